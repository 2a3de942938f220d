// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::Context;
use anyhow::bail;
use http::StatusCode;
use unicase::UniCase;
use uuid::Uuid;

use appid_management::AccessTokenExpiry;
use appid_management::AppIdManagement;
use appid_management::Application;
use appid_management::ApplicationScopes;
use appid_management::BearerTokenAuthenticator;
use appid_management::CloudDirectoryUser;
use appid_management::CreateCloudDirectoryUserRequest;
use appid_management::Error;
use appid_management::ListCloudDirectoryUsersQuery;
use appid_management::NoAuthAuthenticator;
use appid_management::RefreshTokenConfig;
use appid_management::RegisterApplicationRequest;
use appid_management::Role;
use appid_management::RoleRequest;
use appid_management::TokenClaimMapping;
use appid_management::TokensConfig;
use appid_management::UpdateApplicationRequest;
use appid_management::UpdateRolesRequest;

/// Drives a management API (real or the test server) through the client
/// and checks the replies.
pub struct Tester {
    client: AppIdManagement,
    // Keeps names unique when the same tenant is exercised more than once.
    run_id: String,
}

fn expect_status<T>(
    result: Result<T, Error>,
    expected: StatusCode,
    what: &str,
) -> anyhow::Result<()> {
    match result {
        Ok(_) => bail!("{what} succeeded, expected {expected}"),

        Err(error) => match error.status() {
            Some(status) if status == expected => Ok(()),

            _ => bail!("{what} failed with {error}, expected {expected}"),
        },
    }
}

impl Tester {
    pub fn new(url: &str, tenant_id: &str) -> anyhow::Result<Self> {
        let client = AppIdManagement::builder(tenant_id)
            .url(url)
            .authenticator(NoAuthAuthenticator)
            .build()?;

        Ok(Self::with_client(client))
    }

    pub fn new_with_bearer_auth(
        url: &str,
        tenant_id: &str,
        bearer: String,
    ) -> anyhow::Result<Self> {
        let client = AppIdManagement::builder(tenant_id)
            .url(url)
            .authenticator(BearerTokenAuthenticator::new(bearer))
            .build()?;

        Ok(Self::with_client(client))
    }

    pub fn with_client(client: AppIdManagement) -> Self {
        let run_id = Uuid::new_v4().simple().to_string()[..8].to_string();
        Self { client, run_id }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        self.nonexistent_resource_tests()
            .await
            .context("nonexistent_resource_tests")?;

        let application =
            self.application_tests().await.context("application_tests")?;

        let role = self.role_tests(&application).await.context("role_tests")?;

        self.cloud_directory_user_tests(&role)
            .await
            .context("cloud_directory_user_tests")?;

        self.tokens_config_tests().await.context("tokens_config_tests")?;

        self.cleanup(&application, &role).await.context("cleanup")?;

        Ok(())
    }

    fn name(&self, base: &str) -> String {
        format!("{base}-{}", self.run_id)
    }

    async fn nonexistent_resource_tests(&self) -> anyhow::Result<()> {
        let random_id = "999999";

        expect_status(
            self.client.get_application(random_id, None).await,
            StatusCode::NOT_FOUND,
            "GET of nonexistent application",
        )?;

        expect_status(
            self.client.delete_application(random_id, None).await,
            StatusCode::NOT_FOUND,
            "DELETE of nonexistent application",
        )?;

        expect_status(
            self.client.get_role(random_id, None).await,
            StatusCode::NOT_FOUND,
            "GET of nonexistent role",
        )?;

        expect_status(
            self.client.delete_role(random_id, None).await,
            StatusCode::NOT_FOUND,
            "DELETE of nonexistent role",
        )?;

        expect_status(
            self.client.get_cloud_directory_user(random_id, None).await,
            StatusCode::NOT_FOUND,
            "GET of nonexistent Cloud Directory user",
        )?;

        expect_status(
            self.client.delete_cloud_directory_user(random_id, None).await,
            StatusCode::NOT_FOUND,
            "DELETE of nonexistent Cloud Directory user",
        )?;

        Ok(())
    }

    async fn application_tests(&self) -> anyhow::Result<Application> {
        let name = self.name("dunder-web");

        let request = RegisterApplicationRequest::new(&name);
        let created = self.client.register_application(&request, None).await?;

        if !created.status().is_success() {
            bail!("registering {name} returned {}", created.status());
        }

        let application = created.into_inner();

        if application.name.as_deref() != Some(name.as_str()) {
            bail!(
                "registered application is named {:?}, not {name}",
                application.name
            );
        }

        // Names are unique within a tenant.
        expect_status(
            self.client.register_application(&request, None).await,
            StatusCode::CONFLICT,
            "registering a duplicate application",
        )?;

        let fetched = self
            .client
            .get_application(&application.client_id, None)
            .await?
            .into_inner();

        if fetched != application {
            bail!("fetched application {fetched:?} != {application:?}");
        }

        let renamed = self.name("dunder-portal");
        let updated = self
            .client
            .update_application(
                &application.client_id,
                &UpdateApplicationRequest { name: renamed.clone() },
                None,
            )
            .await?
            .into_inner();

        if updated.name.as_deref() != Some(renamed.as_str()) {
            bail!("renamed application is named {:?}", updated.name);
        }

        let scopes = ApplicationScopes {
            scopes: vec![String::from("read"), String::from("write")],
        };
        self.client
            .put_application_scopes(&application.client_id, &scopes, None)
            .await?;

        let fetched_scopes = self
            .client
            .get_application_scopes(&application.client_id, None)
            .await?
            .into_inner();

        if fetched_scopes != scopes {
            bail!("application scopes are {:?}", fetched_scopes.scopes);
        }

        let listed = self.client.list_applications(None).await?.into_inner();
        if !listed
            .applications
            .iter()
            .any(|a| a.client_id == application.client_id)
        {
            bail!("application list does not contain {renamed}");
        }

        Ok(updated)
    }

    async fn role_tests(
        &self,
        application: &Application,
    ) -> anyhow::Result<Role> {
        let name = self.name("regional-manager");
        let request = RoleRequest::new(&name)
            .description("Runs the branch")
            .grant(&application.client_id, ["read"]);

        let role = self.client.create_role(&request, None).await?.into_inner();

        if role.name != name {
            bail!("created role is named {}, not {name}", role.name);
        }

        expect_status(
            self.client.create_role(&request, None).await,
            StatusCode::CONFLICT,
            "creating a duplicate role",
        )?;

        let roles = self.client.list_roles(None).await?.into_inner();
        if !roles.roles.contains(&role) {
            bail!("role list does not contain {name}");
        }

        let assigned = self
            .client
            .put_application_roles(
                &application.client_id,
                &UpdateRolesRequest::new([role.id.clone()]),
                None,
            )
            .await?
            .into_inner();

        if assigned.roles.len() != 1 || assigned.roles[0].id != role.id {
            bail!("application roles are {:?}", assigned.roles);
        }

        Ok(role)
    }

    async fn cloud_directory_user_tests(
        &self,
        role: &Role,
    ) -> anyhow::Result<()> {
        let email = format!("dschrute-{}@dundermifflin.com", self.run_id);

        let request = CreateCloudDirectoryUserRequest::new(&email, "beets!");
        let user = self
            .client
            .create_cloud_directory_user(&request, None)
            .await?
            .into_inner();

        if user.primary_email() != Some(email.as_str()) {
            bail!("created user has email {:?}", user.primary_email());
        }

        expect_status(
            self.client.create_cloud_directory_user(&request, None).await,
            StatusCode::CONFLICT,
            "creating a user with a duplicate email",
        )?;

        let shouted = email.to_uppercase();
        let found = self
            .client
            .list_cloud_directory_users(
                &ListCloudDirectoryUsersQuery {
                    query: Some(shouted.clone()),
                    ..Default::default()
                },
                None,
            )
            .await?
            .into_inner();

        if !found.resources.iter().any(|u| u.id == user.id) {
            bail!("searching for {shouted} did not find {}", user.id);
        }

        let everyone: Vec<CloudDirectoryUser> =
            self.client.list_all_cloud_directory_users(None, 2, None).await?;

        if !everyone.iter().any(|u| {
            u.primary_email()
                .is_some_and(|e| UniCase::new(e) == UniCase::new(&email))
        }) {
            bail!("listing all users did not return {email}");
        }

        let assigned = self
            .client
            .update_user_roles(
                &user.id,
                &UpdateRolesRequest::new([role.id.clone()]),
                None,
            )
            .await?
            .into_inner();

        if assigned.roles.first().and_then(|r| r.name.as_deref())
            != Some(role.name.as_str())
        {
            bail!("user roles are {:?}", assigned.roles);
        }

        self.client.delete_cloud_directory_user(&user.id, None).await?;

        expect_status(
            self.client.get_cloud_directory_user(&user.id, None).await,
            StatusCode::NOT_FOUND,
            "GET of deleted Cloud Directory user",
        )?;

        Ok(())
    }

    async fn tokens_config_tests(&self) -> anyhow::Result<()> {
        let config = TokensConfig {
            access_token_claims: vec![TokenClaimMapping {
                source: String::from("attributes"),
                source_claim: Some(String::from("branch")),
                destination_claim: None,
            }],
            access: Some(AccessTokenExpiry { expires_in: 3600 }),
            refresh: Some(RefreshTokenConfig {
                enabled: true,
                expires_in: Some(2_592_000),
            }),
            ..Default::default()
        };

        self.client.put_tokens_config(&config, None).await?;

        let fetched = self.client.get_tokens_config(None).await?.into_inner();

        if fetched != config {
            bail!("tokens config is {fetched:?}, expected {config:?}");
        }

        Ok(())
    }

    async fn cleanup(
        &self,
        application: &Application,
        role: &Role,
    ) -> anyhow::Result<()> {
        self.client.delete_role(&role.id, None).await?;

        let held = self
            .client
            .get_application_roles(&application.client_id, None)
            .await?
            .into_inner();

        if !held.roles.is_empty() {
            bail!("deleted role is still assigned: {:?}", held.roles);
        }

        self.client.delete_application(&application.client_id, None).await?;

        expect_status(
            self.client.get_application(&application.client_id, None).await,
            StatusCode::NOT_FOUND,
            "GET of deleted application",
        )?;

        Ok(())
    }
}
