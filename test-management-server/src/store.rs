// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use appid_management::Application;
use appid_management::ApplicationScopes;
use appid_management::ApplicationType;
use appid_management::ApplicationsList;
use appid_management::AssignedRoles;
use appid_management::CloudDirectoryUser;
use appid_management::CloudDirectoryUserList;
use appid_management::CloudDirectoryUserStatus;
use appid_management::CreateCloudDirectoryUserRequest;
use appid_management::Email;
use appid_management::ListCloudDirectoryUsersQuery;
use appid_management::RegisterApplicationRequest;
use appid_management::Role;
use appid_management::RoleRef;
use appid_management::RoleRequest;
use appid_management::RolesList;
use appid_management::UpdateApplicationRequest;
use appid_management::UpdateCloudDirectoryUserRequest;
use appid_management::UpdateRolesRequest;
use appid_management::UserMeta;
use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Mutex;
use unicase::UniCase;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: u64 = 20;

#[derive(Clone)]
struct StoredApplication {
    application: Application,
    scopes: Vec<String>,
    role_ids: Vec<String>,
}

#[derive(Default)]
struct TenantState {
    applications: BTreeMap<String, StoredApplication>,
    roles: BTreeMap<String, Role>,
    users: BTreeMap<String, CloudDirectoryUser>,
    user_roles: BTreeMap<String, Vec<String>>,
    documents: BTreeMap<String, Value>,
}

impl TenantState {
    fn role_refs(&self, role_ids: &[String]) -> AssignedRoles {
        AssignedRoles {
            roles: role_ids
                .iter()
                .map(|id| RoleRef {
                    id: id.clone(),
                    name: self.roles.get(id).map(|role| role.name.clone()),
                })
                .collect(),
        }
    }

    fn check_role_ids(
        &self,
        request: &UpdateRolesRequest,
    ) -> Result<(), ApiError> {
        for id in &request.roles.ids {
            if !self.roles.contains_key(id) {
                return Err(ApiError::not_found("role", id));
            }
        }
        Ok(())
    }

    fn application_name_taken(
        &self,
        name: &str,
        except: Option<&str>,
    ) -> bool {
        self.applications.values().any(|stored| {
            stored.application.name.as_deref() == Some(name)
                && Some(stored.application.client_id.as_str()) != except
        })
    }

    fn role_name_taken(&self, name: &str, except: Option<&str>) -> bool {
        self.roles
            .values()
            .any(|role| role.name == name && Some(role.id.as_str()) != except)
    }

    fn email_taken(&self, emails: &[Email], except: Option<&str>) -> bool {
        self.users.values().any(|user| {
            Some(user.id.as_str()) != except
                && user.emails.iter().any(|existing| {
                    emails.iter().any(|email| {
                        UniCase::new(&existing.value)
                            == UniCase::new(&email.value)
                    })
                })
        })
    }
}

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} is required")));
    }
    Ok(())
}

fn matches_query(user: &CloudDirectoryUser, query: &str) -> bool {
    let query = UniCase::new(query);

    user.user_name.as_deref().is_some_and(|name| UniCase::new(name) == query)
        || user
            .emails
            .iter()
            .any(|email| UniCase::new(email.value.as_str()) == query)
}

/// A per-tenant, non-persistent store behind the test server.
#[derive(Default)]
pub struct ManagementStore {
    tenants: Mutex<BTreeMap<String, TenantState>>,
}

impl ManagementStore {
    fn with_tenant<R>(
        &self,
        tenant_id: &str,
        f: impl FnOnce(&mut TenantState) -> R,
    ) -> R {
        let mut tenants = self.tenants.lock().unwrap();
        f(tenants.entry(tenant_id.to_string()).or_default())
    }

    pub fn list_applications(&self, tenant_id: &str) -> ApplicationsList {
        self.with_tenant(tenant_id, |state| ApplicationsList {
            applications: state
                .applications
                .values()
                .map(|stored| stored.application.clone())
                .collect(),
        })
    }

    pub fn register_application(
        &self,
        tenant_id: &str,
        request: RegisterApplicationRequest,
    ) -> Result<Application, ApiError> {
        require("name", &request.name)?;

        self.with_tenant(tenant_id, |state| {
            if state.application_name_taken(&request.name, None) {
                return Err(ApiError::conflict(format!(
                    "application {} exists already",
                    request.name
                )));
            }

            let client_id = Uuid::new_v4().to_string();
            let application = Application {
                client_id: client_id.clone(),
                tenant_id: Some(tenant_id.to_string()),
                secret: Some(Uuid::new_v4().to_string()),
                name: Some(request.name),
                application_type: Some(
                    request
                        .application_type
                        .unwrap_or(ApplicationType::RegularWebApp),
                ),
                ..Default::default()
            };

            state.applications.insert(
                client_id,
                StoredApplication {
                    application: application.clone(),
                    scopes: Vec::new(),
                    role_ids: Vec::new(),
                },
            );

            Ok(application)
        })
    }

    pub fn get_application(
        &self,
        tenant_id: &str,
        client_id: &str,
    ) -> Result<Application, ApiError> {
        self.with_tenant(tenant_id, |state| {
            state
                .applications
                .get(client_id)
                .map(|stored| stored.application.clone())
                .ok_or_else(|| ApiError::not_found("application", client_id))
        })
    }

    pub fn update_application(
        &self,
        tenant_id: &str,
        client_id: &str,
        request: UpdateApplicationRequest,
    ) -> Result<Application, ApiError> {
        require("name", &request.name)?;

        self.with_tenant(tenant_id, |state| {
            if !state.applications.contains_key(client_id) {
                return Err(ApiError::not_found("application", client_id));
            }

            if state.application_name_taken(&request.name, Some(client_id)) {
                return Err(ApiError::conflict(format!(
                    "application {} exists already",
                    request.name
                )));
            }

            let stored = state
                .applications
                .get_mut(client_id)
                .ok_or_else(|| ApiError::not_found("application", client_id))?;
            stored.application.name = Some(request.name);

            Ok(stored.application.clone())
        })
    }

    pub fn delete_application(
        &self,
        tenant_id: &str,
        client_id: &str,
    ) -> Result<(), ApiError> {
        self.with_tenant(tenant_id, |state| {
            state
                .applications
                .remove(client_id)
                .map(|_| ())
                .ok_or_else(|| ApiError::not_found("application", client_id))
        })
    }

    pub fn application_scopes(
        &self,
        tenant_id: &str,
        client_id: &str,
    ) -> Result<ApplicationScopes, ApiError> {
        self.with_tenant(tenant_id, |state| {
            state
                .applications
                .get(client_id)
                .map(|stored| ApplicationScopes {
                    scopes: stored.scopes.clone(),
                })
                .ok_or_else(|| ApiError::not_found("application", client_id))
        })
    }

    pub fn set_application_scopes(
        &self,
        tenant_id: &str,
        client_id: &str,
        request: ApplicationScopes,
    ) -> Result<ApplicationScopes, ApiError> {
        self.with_tenant(tenant_id, |state| {
            let stored = state
                .applications
                .get_mut(client_id)
                .ok_or_else(|| ApiError::not_found("application", client_id))?;
            stored.scopes = request.scopes;

            Ok(ApplicationScopes { scopes: stored.scopes.clone() })
        })
    }

    pub fn application_roles(
        &self,
        tenant_id: &str,
        client_id: &str,
    ) -> Result<AssignedRoles, ApiError> {
        self.with_tenant(tenant_id, |state| {
            let stored = state
                .applications
                .get(client_id)
                .ok_or_else(|| ApiError::not_found("application", client_id))?;

            Ok(state.role_refs(&stored.role_ids))
        })
    }

    pub fn set_application_roles(
        &self,
        tenant_id: &str,
        client_id: &str,
        request: UpdateRolesRequest,
    ) -> Result<AssignedRoles, ApiError> {
        self.with_tenant(tenant_id, |state| {
            if !state.applications.contains_key(client_id) {
                return Err(ApiError::not_found("application", client_id));
            }
            state.check_role_ids(&request)?;

            let role_ids = request.roles.ids;
            let assigned = state.role_refs(&role_ids);

            if let Some(stored) = state.applications.get_mut(client_id) {
                stored.role_ids = role_ids;
            }

            Ok(assigned)
        })
    }

    pub fn list_roles(&self, tenant_id: &str) -> RolesList {
        self.with_tenant(tenant_id, |state| RolesList {
            roles: state.roles.values().cloned().collect(),
        })
    }

    pub fn create_role(
        &self,
        tenant_id: &str,
        request: RoleRequest,
    ) -> Result<Role, ApiError> {
        require("name", &request.name)?;

        self.with_tenant(tenant_id, |state| {
            if state.role_name_taken(&request.name, None) {
                return Err(ApiError::conflict(format!(
                    "role {} exists already",
                    request.name
                )));
            }

            let role = Role {
                id: Uuid::new_v4().to_string(),
                name: request.name,
                description: request.description,
                access: request.access,
            };
            state.roles.insert(role.id.clone(), role.clone());

            Ok(role)
        })
    }

    pub fn get_role(
        &self,
        tenant_id: &str,
        role_id: &str,
    ) -> Result<Role, ApiError> {
        self.with_tenant(tenant_id, |state| {
            state
                .roles
                .get(role_id)
                .cloned()
                .ok_or_else(|| ApiError::not_found("role", role_id))
        })
    }

    pub fn update_role(
        &self,
        tenant_id: &str,
        role_id: &str,
        request: RoleRequest,
    ) -> Result<Role, ApiError> {
        require("name", &request.name)?;

        self.with_tenant(tenant_id, |state| {
            if !state.roles.contains_key(role_id) {
                return Err(ApiError::not_found("role", role_id));
            }

            if state.role_name_taken(&request.name, Some(role_id)) {
                return Err(ApiError::conflict(format!(
                    "role {} exists already",
                    request.name
                )));
            }

            let role = Role {
                id: role_id.to_string(),
                name: request.name,
                description: request.description,
                access: request.access,
            };
            state.roles.insert(role.id.clone(), role.clone());

            Ok(role)
        })
    }

    /// Deleting a role also drops it from every application and user that
    /// held it.
    pub fn delete_role(
        &self,
        tenant_id: &str,
        role_id: &str,
    ) -> Result<(), ApiError> {
        self.with_tenant(tenant_id, |state| {
            if state.roles.remove(role_id).is_none() {
                return Err(ApiError::not_found("role", role_id));
            }

            for stored in state.applications.values_mut() {
                stored.role_ids.retain(|id| id != role_id);
            }
            for role_ids in state.user_roles.values_mut() {
                role_ids.retain(|id| id != role_id);
            }

            Ok(())
        })
    }

    /// `startIndex` is zero based. `query` must equal a user name or email,
    /// ignoring case.
    pub fn list_cloud_directory_users(
        &self,
        tenant_id: &str,
        query: &ListCloudDirectoryUsersQuery,
    ) -> CloudDirectoryUserList {
        self.with_tenant(tenant_id, |state| {
            let matching: Vec<&CloudDirectoryUser> = state
                .users
                .values()
                .filter(|user| match &query.query {
                    Some(q) if !q.is_empty() => matches_query(user, q),
                    _ => true,
                })
                .collect();

            let start = query.start_index.unwrap_or(0) as usize;
            let count = query.count.unwrap_or(DEFAULT_PAGE_SIZE) as usize;

            let resources: Vec<CloudDirectoryUser> = matching
                .iter()
                .skip(start)
                .take(count)
                .map(|user| (*user).clone())
                .collect();

            CloudDirectoryUserList {
                total_results: matching.len() as u64,
                items_per_page: resources.len() as u64,
                resources,
            }
        })
    }

    pub fn create_cloud_directory_user(
        &self,
        tenant_id: &str,
        request: CreateCloudDirectoryUserRequest,
    ) -> Result<CloudDirectoryUser, ApiError> {
        let Some(first) = request.emails.first() else {
            return Err(ApiError::bad_request(String::from(
                "emails is required",
            )));
        };
        require("emails[].value", &first.value)?;
        require("password", &request.password)?;

        self.with_tenant(tenant_id, |state| {
            if state.email_taken(&request.emails, None) {
                return Err(ApiError::conflict(String::from(
                    "a user with this email exists already",
                )));
            }

            let now = Utc::now();
            let user_name = request
                .user_name
                .or_else(|| request.emails.first().map(|e| e.value.clone()));

            let user = CloudDirectoryUser {
                id: Uuid::new_v4().to_string(),
                user_name,
                display_name: request.display_name,
                active: Some(request.active.unwrap_or(true)),
                status: Some(
                    request.status.unwrap_or(CloudDirectoryUserStatus::Pending),
                ),
                locked_until: request.locked_until,
                emails: request.emails,
                meta: Some(UserMeta {
                    created: Some(now),
                    last_modified: Some(now),
                }),
                schemas: vec![String::from(
                    "urn:ietf:params:scim:schemas:core:2.0:User",
                )],
            };

            state.users.insert(user.id.clone(), user.clone());

            Ok(user)
        })
    }

    pub fn get_cloud_directory_user(
        &self,
        tenant_id: &str,
        user_id: &str,
    ) -> Result<CloudDirectoryUser, ApiError> {
        self.with_tenant(tenant_id, |state| {
            state
                .users
                .get(user_id)
                .cloned()
                .ok_or_else(|| ApiError::not_found("user", user_id))
        })
    }

    pub fn update_cloud_directory_user(
        &self,
        tenant_id: &str,
        user_id: &str,
        request: UpdateCloudDirectoryUserRequest,
    ) -> Result<CloudDirectoryUser, ApiError> {
        if request.emails.is_empty() {
            return Err(ApiError::bad_request(String::from(
                "emails is required",
            )));
        }

        self.with_tenant(tenant_id, |state| {
            if !state.users.contains_key(user_id) {
                return Err(ApiError::not_found("user", user_id));
            }

            if state.email_taken(&request.emails, Some(user_id)) {
                return Err(ApiError::conflict(String::from(
                    "a user with this email exists already",
                )));
            }

            let user = state
                .users
                .get_mut(user_id)
                .ok_or_else(|| ApiError::not_found("user", user_id))?;

            user.emails = request.emails;
            if request.user_name.is_some() {
                user.user_name = request.user_name;
            }
            if request.display_name.is_some() {
                user.display_name = request.display_name;
            }
            if request.active.is_some() {
                user.active = request.active;
            }
            if request.status.is_some() {
                user.status = request.status;
            }
            user.locked_until = request.locked_until;
            if let Some(meta) = &mut user.meta {
                meta.last_modified = Some(Utc::now());
            }

            Ok(user.clone())
        })
    }

    pub fn delete_cloud_directory_user(
        &self,
        tenant_id: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        self.with_tenant(tenant_id, |state| {
            state.user_roles.remove(user_id);
            state
                .users
                .remove(user_id)
                .map(|_| ())
                .ok_or_else(|| ApiError::not_found("user", user_id))
        })
    }

    /// Profiles are not modelled, so any id answers with whatever roles were
    /// last assigned to it.
    pub fn user_roles(&self, tenant_id: &str, user_id: &str) -> AssignedRoles {
        self.with_tenant(tenant_id, |state| {
            let role_ids =
                state.user_roles.get(user_id).cloned().unwrap_or_default();
            state.role_refs(&role_ids)
        })
    }

    pub fn set_user_roles(
        &self,
        tenant_id: &str,
        user_id: &str,
        request: UpdateRolesRequest,
    ) -> Result<AssignedRoles, ApiError> {
        self.with_tenant(tenant_id, |state| {
            state.check_role_ids(&request)?;

            let role_ids = request.roles.ids;
            let assigned = state.role_refs(&role_ids);
            state.user_roles.insert(user_id.to_string(), role_ids);

            Ok(assigned)
        })
    }

    pub fn get_document(
        &self,
        tenant_id: &str,
        key: &str,
    ) -> Result<Value, ApiError> {
        self.with_tenant(tenant_id, |state| {
            state
                .documents
                .get(key)
                .cloned()
                .ok_or_else(|| ApiError::not_found("config", key))
        })
    }

    pub fn put_document(
        &self,
        tenant_id: &str,
        key: &str,
        document: Value,
    ) -> Value {
        self.with_tenant(tenant_id, |state| {
            state.documents.insert(key.to_string(), document.clone());
            document
        })
    }

    pub fn delete_document(
        &self,
        tenant_id: &str,
        key: &str,
    ) -> Result<(), ApiError> {
        self.with_tenant(tenant_id, |state| {
            state
                .documents
                .remove(key)
                .map(|_| ())
                .ok_or_else(|| ApiError::not_found("config", key))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_application_names_are_unique() {
        let store = ManagementStore::default();

        let first = store
            .register_application("t", RegisterApplicationRequest::new("web"))
            .unwrap();
        assert_eq!(
            first.application_type,
            Some(ApplicationType::RegularWebApp)
        );

        let err = store
            .register_application("t", RegisterApplicationRequest::new("web"))
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        // Another tenant has its own namespace.
        store
            .register_application("u", RegisterApplicationRequest::new("web"))
            .unwrap();
    }

    #[test]
    fn test_delete_role_unassigns_it() {
        let store = ManagementStore::default();

        let app = store
            .register_application("t", RegisterApplicationRequest::new("web"))
            .unwrap();
        let role = store.create_role("t", RoleRequest::new("admin")).unwrap();

        store
            .set_application_roles(
                "t",
                &app.client_id,
                UpdateRolesRequest::new([role.id.clone()]),
            )
            .unwrap();
        store
            .set_user_roles(
                "t",
                "profile-1",
                UpdateRolesRequest::new([role.id.clone()]),
            )
            .unwrap();

        let held = store.application_roles("t", &app.client_id).unwrap();
        assert_eq!(held.roles[0].name.as_deref(), Some("admin"));

        store.delete_role("t", &role.id).unwrap();

        let held = store.application_roles("t", &app.client_id).unwrap();
        assert!(held.roles.is_empty());
        assert!(store.user_roles("t", "profile-1").roles.is_empty());
    }

    #[test]
    fn test_assigning_unknown_role_fails() {
        let store = ManagementStore::default();
        let err = store
            .set_user_roles("t", "p", UpdateRolesRequest::new(["nope"]))
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_cloud_directory_paging_and_query() {
        let store = ManagementStore::default();

        for i in 0..5 {
            store
                .create_cloud_directory_user(
                    "t",
                    CreateCloudDirectoryUserRequest::new(
                        format!("user{i}@example.com"),
                        "pw",
                    ),
                )
                .unwrap();
        }

        let page = store.list_cloud_directory_users(
            "t",
            &ListCloudDirectoryUsersQuery {
                start_index: Some(4),
                count: Some(2),
                query: None,
            },
        );
        assert_eq!(page.total_results, 5);
        assert_eq!(page.items_per_page, 1);

        let found = store.list_cloud_directory_users(
            "t",
            &ListCloudDirectoryUsersQuery {
                start_index: None,
                count: None,
                query: Some(String::from("USER3@Example.com")),
            },
        );
        assert_eq!(found.total_results, 1);
        assert_eq!(
            found.resources[0].primary_email(),
            Some("user3@example.com")
        );
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        let store = ManagementStore::default();
        store
            .create_cloud_directory_user(
                "t",
                CreateCloudDirectoryUserRequest::new("a@example.com", "pw"),
            )
            .unwrap();

        let err = store
            .create_cloud_directory_user(
                "t",
                CreateCloudDirectoryUserRequest::new("A@EXAMPLE.COM", "pw"),
            )
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_documents() {
        let store = ManagementStore::default();
        let key = "cloud_directory/sso";

        assert!(store.get_document("t", key).is_err());

        let doc = serde_json::json!({"isActive": true});
        assert_eq!(store.put_document("t", key, doc.clone()), doc);
        assert_eq!(store.get_document("t", key).unwrap(), doc);

        store.delete_document("t", key).unwrap();
        assert_eq!(
            store.delete_document("t", key).unwrap_err().status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
