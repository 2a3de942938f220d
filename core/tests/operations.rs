// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One exchange per operation: every call must reach its own method, path
//! and operation id, and the reply must decode through the mixed-case wire
//! names. Operations already exercised in `fixtures.rs` are not repeated.

use appid_management::ActionUrl;
use appid_management::ActionUrlAction;
use appid_management::AdvancedPasswordManagementConfig;
use appid_management::AppIdManagement;
use appid_management::ApplicationScopes;
use appid_management::AuditStatus;
use appid_management::BearerTokenAuthenticator;
use appid_management::ChangePasswordRequest;
use appid_management::CloudDirectoryIdpConfig;
use appid_management::CloudDirectoryImportRequest;
use appid_management::CloudDirectoryUserStatus;
use appid_management::CreateCloudDirectoryUserRequest;
use appid_management::CustomDispatcherConfig;
use appid_management::CustomIdpConfig;
use appid_management::CustomIdpSettings;
use appid_management::DispatcherAuthorization;
use appid_management::DispatcherAuthorizationType;
use appid_management::Email;
use appid_management::EmailAddress;
use appid_management::EmailDispatcherConfig;
use appid_management::EmailProvider;
use appid_management::EmailSettingsTestRequest;
use appid_management::EmailTemplate;
use appid_management::Error;
use appid_management::ExportedCloudDirectoryUser;
use appid_management::ExportedUserProfile;
use appid_management::ExtensionActive;
use appid_management::ExtensionConfig;
use appid_management::ExtensionTarget;
use appid_management::IdentityConfirmationAccessMode;
use appid_management::IdentityField;
use appid_management::Languages;
use appid_management::MfaChannelConfig;
use appid_management::MfaChannelType;
use appid_management::MfaConfig;
use appid_management::MfaExtensionName;
use appid_management::NominateUserRequest;
use appid_management::PageRequest;
use appid_management::PasswordRegexConfig;
use appid_management::ProfileAttributes;
use appid_management::RateLimitConfig;
use appid_management::RoleRequest;
use appid_management::SamlIdpConfig;
use appid_management::SamlSettings;
use appid_management::SenderDetails;
use appid_management::SenderDetailsConfig;
use appid_management::SocialIdpConfig;
use appid_management::SocialIdpCredentials;
use appid_management::SsoConfig;
use appid_management::TemplateName;
use appid_management::ThemeColor;
use appid_management::ThemeText;
use appid_management::TokensConfig;
use appid_management::UpdateApplicationRequest;
use appid_management::UpdateCloudDirectoryUserRequest;
use appid_management::UpdateMfaChannelRequest;
use appid_management::UpdateRolesRequest;
use appid_management::UserProfilesConfig;
use appid_management::UserProfilesImportRequest;
use httpmock::prelude::*;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

const TENANT: &str = "tenant-1";
const ANALYTICS: &str = "x-ibmcloud-sdk-analytics";

fn client(server: &MockServer) -> AppIdManagement {
    AppIdManagement::builder(TENANT)
        .url(server.base_url())
        .authenticator(BearerTokenAuthenticator::new("tok"))
        .build()
        .unwrap()
}

fn path(suffix: &str) -> String {
    format!("/management/v4/{TENANT}/{suffix}")
}

fn analytics(operation_id: &str) -> String {
    format!(
        "service_name=appid_management;service_version=V4;\
         operation_id={operation_id}"
    )
}

/// Runs `$call` against an endpoint that only answers `$method` on
/// `$suffix` for `$operation_id`, checks it was hit exactly once and yields
/// the decoded reply.
macro_rules! exchange {
    (
        $server:expr,
        $method:expr,
        $suffix:expr,
        $operation_id:expr,
        $reply:expr,
        $call:expr $(,)?
    ) => {{
        let mock = $server
            .mock_async(|when, then| {
                when.method($method)
                    .path(path($suffix))
                    .header(ANALYTICS, analytics($operation_id));
                then.status(200).json_body($reply);
            })
            .await;
        let reply = $call.await.unwrap();
        mock.assert_async().await;
        reply.into_inner()
    }};
}

fn attributes(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[tokio::test]
async fn test_application_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let app = exchange!(
        server,
        GET,
        "applications/c1",
        "GetApplication",
        json!({"clientId": "c1", "name": "web", "oAuthServerUrl": "https://o"}),
        client.get_application("c1", None),
    );
    assert_eq!(app.o_auth_server_url.as_deref(), Some("https://o"));

    let renamed = exchange!(
        server,
        PUT,
        "applications/c1",
        "UpdateApplication",
        json!({"clientId": "c1", "name": "portal"}),
        client.update_application(
            "c1",
            &UpdateApplicationRequest { name: String::from("portal") },
            None,
        ),
    );
    assert_eq!(renamed.name.as_deref(), Some("portal"));

    exchange!(
        server,
        DELETE,
        "applications/c1",
        "DeleteApplication",
        json!({}),
        client.delete_application("c1", None),
    );

    let scopes = exchange!(
        server,
        GET,
        "applications/c1/scopes",
        "GetApplicationScopes",
        json!({"scopes": ["read"]}),
        client.get_application_scopes("c1", None),
    );
    assert_eq!(scopes.scopes, ["read"]);

    let scopes = ApplicationScopes { scopes: vec![String::from("write")] };
    exchange!(
        server,
        PUT,
        "applications/c1/scopes",
        "PutApplicationsScopes",
        json!({"scopes": ["write"]}),
        client.put_application_scopes("c1", &scopes, None),
    );

    let roles = exchange!(
        server,
        GET,
        "applications/c1/roles",
        "GetApplicationRoles",
        json!({"roles": [{"id": "r1", "name": "auditor"}]}),
        client.get_application_roles("c1", None),
    );
    assert_eq!(roles.roles[0].name.as_deref(), Some("auditor"));

    let assigned = exchange!(
        server,
        PUT,
        "applications/c1/roles",
        "PutApplicationsRoles",
        json!({"roles": [{"id": "r2"}]}),
        client.put_application_roles(
            "c1",
            &UpdateRolesRequest::new(["r2"]),
            None,
        ),
    );
    assert_eq!(assigned.roles[0].id, "r2");
}

#[tokio::test]
async fn test_cloud_directory_user_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);
    let user = json!({
        "id": "u1",
        "userName": "dwight",
        "displayName": "Dwight",
        "status": "CONFIRMED",
        "emails": [{"value": "dwight@example.com", "primary": true}]
    });

    let created = exchange!(
        server,
        POST,
        "cloud_directory/Users",
        "CreateCloudDirectoryUser",
        user.clone(),
        client.create_cloud_directory_user(
            &CreateCloudDirectoryUserRequest::new("dwight@example.com", "b"),
            None,
        ),
    );
    assert_eq!(created.display_name.as_deref(), Some("Dwight"));

    let fetched = exchange!(
        server,
        GET,
        "cloud_directory/Users/u1",
        "GetCloudDirectoryUser",
        user.clone(),
        client.get_cloud_directory_user("u1", None),
    );
    assert_eq!(fetched.status, Some(CloudDirectoryUserStatus::Confirmed));

    let update = UpdateCloudDirectoryUserRequest {
        emails: vec![Email::primary("dwight@example.com")],
        display_name: Some(String::from("Assistant Manager")),
        ..Default::default()
    };
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("cloud_directory/Users/u1"))
                .header(ANALYTICS, analytics("UpdateCloudDirectoryUser"))
                .json_body(json!({
                    "emails": [
                        {"value": "dwight@example.com", "primary": true}
                    ],
                    "displayName": "Assistant Manager"
                }));
            then.status(200).json_body(user.clone());
        })
        .await;
    client.update_cloud_directory_user("u1", &update, None).await.unwrap();
    mock.assert_async().await;

    let error = client
        .update_cloud_directory_user(
            "u1",
            &UpdateCloudDirectoryUserRequest::default(),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(error, Error::InvalidRequest(_)));

    exchange!(
        server,
        DELETE,
        "cloud_directory/Users/u1",
        "DeleteCloudDirectoryUser",
        json!({}),
        client.delete_cloud_directory_user("u1", None),
    );

    exchange!(
        server,
        POST,
        "cloud_directory/Users/u1/sso/logout",
        "InvalidateUserSSOSessions",
        json!({}),
        client.invalidate_user_sso_sessions("u1", None),
    );

    let info = exchange!(
        server,
        GET,
        "cloud_directory/u1/userinfo",
        "CloudDirectoryGetUserinfo",
        json!({
            "sub": "p1",
            "identities": [{
                "provider": "cloud_directory",
                "id": "u1",
                "idpUserInfo": {"userName": "dwight"}
            }],
            "attributes": {"branch": "scranton"}
        }),
        client.cloud_directory_get_userinfo("u1", None),
    );
    assert_eq!(info.sub.as_deref(), Some("p1"));
    assert!(info.identities[0].idp_user_info.is_some());
    assert_eq!(info.attributes["branch"], "scranton");

    exchange!(
        server,
        DELETE,
        "cloud_directory/remove/u1",
        "CloudDirectoryRemove",
        json!({}),
        client.cloud_directory_remove("u1", None),
    );
}

#[tokio::test]
async fn test_cloud_directory_export_sends_encryption_secret() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(path("cloud_directory/export"))
                .query_param("encryption_secret", "s3cr3t")
                .query_param("startIndex", "0")
                .query_param("count", "50")
                .header(ANALYTICS, analytics("CloudDirectoryExport"));
            then.status(200).json_body(json!({
                "itemsPerPage": 1,
                "totalResults": 1,
                "requestOptions": {"startIndex": 0, "count": 50},
                "users": [{
                    "userName": "dwight",
                    "emails": [{"value": "dwight@example.com"}],
                    "passwordHash": "$2a$10$abc",
                    "passwordHashAlg": "bcrypt",
                    "roles": ["manager"]
                }]
            }));
        })
        .await;

    let client = client(&server);
    let page = PageRequest::new(0, 50);

    let error =
        client.cloud_directory_export("", &page, None).await.unwrap_err();
    assert!(matches!(error, Error::InvalidRequest(_)));

    let export = client
        .cloud_directory_export("s3cr3t", &page, None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;

    assert_eq!(export.total_results, 1);
    assert_eq!(export.request_options, Some(page));
    assert_eq!(export.users[0].password_hash_alg, "bcrypt");
    assert_eq!(export.users[0].roles, ["manager"]);
}

#[tokio::test]
async fn test_cloud_directory_import_sends_encryption_secret() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("cloud_directory/import"))
                .query_param("encryption_secret", "s3cr3t")
                .header(ANALYTICS, analytics("CloudDirectoryImport"))
                .json_body(json!({
                    "users": [{
                        "userName": "dwight",
                        "emails": [
                            {"value": "dwight@example.com", "primary": true}
                        ],
                        "passwordHash": "$2a$10$abc",
                        "passwordHashAlg": "bcrypt",
                        "roles": []
                    }]
                }));
            then.status(200).json_body(json!({
                "added": 0,
                "failed": 1,
                "failReasons": [{
                    "originalId": "u1",
                    "userName": "dwight",
                    "code": "DUPLICATE"
                }]
            }));
        })
        .await;

    let body = CloudDirectoryImportRequest {
        users: vec![ExportedCloudDirectoryUser {
            user_name: String::from("dwight"),
            emails: vec![Email::primary("dwight@example.com")],
            password_hash: String::from("$2a$10$abc"),
            password_hash_alg: String::from("bcrypt"),
            ..Default::default()
        }],
    };
    let outcome = client(&server)
        .cloud_directory_import("s3cr3t", &body, None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;

    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.fail_reasons[0].original_id.as_deref(), Some("u1"));
    assert_eq!(outcome.fail_reasons[0].code.as_deref(), Some("DUPLICATE"));
}

#[tokio::test]
async fn test_confirmation_results() {
    let server = MockServer::start_async().await;
    let verified = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("cloud_directory/sign_up/confirmation_result"))
                .header(ANALYTICS, analytics("UserVerificationResult"))
                .json_body(json!({"context": "ctx-1"}));
            then.status(200).json_body(json!({"success": true, "uuid": "u1"}));
        })
        .await;
    let reset = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path(
                    "cloud_directory/forgot_password/confirmation_result",
                ))
                .header(ANALYTICS, analytics("ForgotPasswordResult"))
                .json_body(json!({"context": "ctx-2"}));
            then.status(200).json_body(json!({"success": false}));
        })
        .await;

    let client = client(&server);

    let result = client
        .user_verification_result("ctx-1", None)
        .await
        .unwrap()
        .into_inner();
    verified.assert_async().await;
    assert!(result.success);
    assert_eq!(result.uuid.as_deref(), Some("u1"));

    let result =
        client.forgot_password_result("ctx-2", None).await.unwrap();
    reset.assert_async().await;
    assert!(!result.success);
    assert_eq!(result.uuid, None);
}

#[tokio::test]
async fn test_start_forgot_password_language_and_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("cloud_directory/forgot_password"))
                .query_param("language", "de")
                .header(ANALYTICS, analytics("StartForgotPassword"))
                .json_body(json!({"user": "dwight@example.com"}));
            then.status(200).json_body(json!({"id": "u1"}));
        })
        .await;

    let user = client(&server)
        .start_forgot_password("dwight@example.com", Some("de"), None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;

    assert_eq!(user.id, "u1");
}

#[tokio::test]
async fn test_change_password_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("cloud_directory/change_password"))
                .query_param("language", "en")
                .header(ANALYTICS, analytics("ChangePassword"))
                .json_body(json!({
                    "newPassword": "b33ts!",
                    "uuid": "u1",
                    "changedIpAddress": "10.0.0.7"
                }));
            then.status(200).json_body(json!({"id": "u1", "active": true}));
        })
        .await;

    let client = client(&server);
    let mut body = ChangePasswordRequest {
        new_password: String::from("b33ts!"),
        uuid: String::from("u1"),
        changed_ip_address: Some(String::from("10.0.0.7")),
    };

    let user = client
        .change_password(&body, Some("en"), None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;
    assert_eq!(user.active, Some(true));

    body.new_password = String::from(" ");
    let error =
        client.change_password(&body, Some("en"), None).await.unwrap_err();
    assert!(matches!(error, Error::InvalidRequest(_)));
    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_resend_notification_path_and_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("cloud_directory/resend/USER_VERIFICATION"))
                .query_param("language", "fr")
                .header(ANALYTICS, analytics("ResendNotification"))
                .json_body(json!({"uuid": "u1"}));
            then.status(202).json_body(json!({"messageId": "m-42"}));
        })
        .await;

    let reply = client(&server)
        .resend_notification(
            TemplateName::UserVerification,
            "u1",
            Some("fr"),
            None,
        )
        .await
        .unwrap();
    mock.assert_async().await;

    assert_eq!(reply.status(), 202);
    assert_eq!(reply.message_id.as_deref(), Some("m-42"));
}

#[tokio::test]
async fn test_config_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let tokens = TokensConfig::default();
    exchange!(
        server,
        PUT,
        "config/tokens",
        "PutTokensConfig",
        json!({"access": {"expires_in": 3600}}),
        client.put_tokens_config(&tokens, None),
    );

    let uris = exchange!(
        server,
        GET,
        "config/redirect_uris",
        "GetRedirectUris",
        json!({
            "redirectUris": ["https://example.com/cb"],
            "trustCloudIAMRedirectUris": true
        }),
        client.get_redirect_uris(None),
    );
    assert_eq!(uris.trust_cloud_iam_redirect_uris, Some(true));

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/redirect_uris"))
                .header(ANALYTICS, analytics("UpdateRedirectUris"))
                .json_body(json!({
                    "redirectUris": ["https://example.com/cb"],
                    "trustCloudIAMRedirectUris": true
                }));
            then.status(204);
        })
        .await;
    client.update_redirect_uris(&uris, None).await.unwrap();
    mock.assert_async().await;

    let profiles = exchange!(
        server,
        GET,
        "config/users_profile",
        "GetUserProfilesConfig",
        json!({"isActive": true}),
        client.get_user_profiles_config(None),
    );
    assert!(profiles.is_active);

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/users_profile"))
                .header(ANALYTICS, analytics("UpdateUserProfilesConfig"))
                .json_body(json!({"isActive": false}));
            then.status(204);
        })
        .await;
    client
        .update_user_profiles_config(
            &UserProfilesConfig { is_active: false },
            None,
        )
        .await
        .unwrap();
    mock.assert_async().await;

    let audit = exchange!(
        server,
        GET,
        "config/capture_runtime_activity",
        "GetAuditStatus",
        json!({"isActive": false}),
        client.get_audit_status(None),
    );
    assert!(!audit.is_active);

    exchange!(
        server,
        PUT,
        "config/capture_runtime_activity",
        "SetAuditStatus",
        json!({}),
        client.set_audit_status(&AuditStatus { is_active: true }, None),
    );
}

#[tokio::test]
async fn test_ui_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let text = exchange!(
        server,
        GET,
        "config/ui/theme_text",
        "GetThemeText",
        json!({"tabTitle": "Login", "footnote": "Paper"}),
        client.get_theme_text(None),
    );
    assert_eq!(text.tab_title.as_deref(), Some("Login"));

    exchange!(
        server,
        PUT,
        "config/ui/theme_text",
        "PostThemeText",
        json!({}),
        client.post_theme_text(&ThemeText::default(), None),
    );

    let color = exchange!(
        server,
        GET,
        "config/ui/theme_color",
        "GetThemeColor",
        json!({"headerColor": "#EEF2F5"}),
        client.get_theme_color(None),
    );
    assert_eq!(color.header_color.as_deref(), Some("#EEF2F5"));

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/ui/theme_color"))
                .header(ANALYTICS, analytics("PostThemeColor"))
                .json_body(json!({"headerColor": "#000000"}));
            then.status(204);
        })
        .await;
    let color = ThemeColor { header_color: Some(String::from("#000000")) };
    client.post_theme_color(&color, None).await.unwrap();
    mock.assert_async().await;

    let media = exchange!(
        server,
        GET,
        "config/ui/media",
        "GetMedia",
        json!({"image": "https://cdn.example.com/logo.png"}),
        client.get_media(None),
    );
    assert_eq!(
        media.image.as_deref(),
        Some("https://cdn.example.com/logo.png")
    );

    let languages = exchange!(
        server,
        GET,
        "config/ui/languages",
        "GetLocalization",
        json!({"languages": ["en", "de"]}),
        client.get_localization(None),
    );
    assert_eq!(languages.languages, ["en", "de"]);

    exchange!(
        server,
        PUT,
        "config/ui/languages",
        "UpdateLocalization",
        json!({}),
        client.update_localization(&languages, None),
    );

    let error = client
        .update_localization(&Languages::default(), None)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn test_template_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let template = exchange!(
        server,
        GET,
        "config/cloud_directory/templates/USER_VERIFICATION/en",
        "GetTemplate",
        json!({
            "subject": "Verify",
            "html_body": "<p>Hi</p>",
            "base64_encoded_html_body": "PHA+SGk8L3A+",
            "plain_text_body": "Hi"
        }),
        client.get_template(TemplateName::UserVerification, "en", None),
    );
    assert_eq!(template.html_body.as_deref(), Some("<p>Hi</p>"));
    assert_eq!(
        template.base64_encoded_html_body.as_deref(),
        Some("PHA+SGk8L3A+")
    );
    assert_eq!(template.plain_text_body.as_deref(), Some("Hi"));

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/cloud_directory/templates/WELCOME/de"))
                .header(ANALYTICS, analytics("UpdateTemplate"))
                .json_body(json!({
                    "subject": "Willkommen",
                    "html_body": "<p>Hallo</p>"
                }));
            then.status(200).json_body(json!({
                "subject": "Willkommen",
                "html_body": "<p>Hallo</p>"
            }));
        })
        .await;
    let body = EmailTemplate {
        subject: String::from("Willkommen"),
        html_body: Some(String::from("<p>Hallo</p>")),
        ..Default::default()
    };
    let updated = client
        .update_template(TemplateName::Welcome, "de", &body, None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;
    assert_eq!(updated, body);

    let error = client
        .update_template(
            TemplateName::Welcome,
            "de",
            &EmailTemplate::default(),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(error, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn test_sender_details_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let details = exchange!(
        server,
        GET,
        "config/cloud_directory/sender_details",
        "GetCloudDirectorySenderDetails",
        json!({
            "senderDetails": {
                "from": {"name": "Dunder", "email": "no-reply@example.com"},
                "reply_to": {"email": "help@example.com"},
                "linkExpirationSec": 900
            }
        }),
        client.get_sender_details(None),
    );
    let sender = &details.sender_details;
    assert_eq!(sender.from.name.as_deref(), Some("Dunder"));
    assert_eq!(
        sender.reply_to.as_ref().map(|r| r.email.as_str()),
        Some("help@example.com")
    );
    assert_eq!(sender.link_expiration_sec, Some(900));

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/cloud_directory/sender_details"))
                .header(ANALYTICS, analytics("SetCloudDirectorySenderDetails"))
                .json_body(json!({
                    "senderDetails": {
                        "from": {"email": "no-reply@example.com"},
                        "reply_to": {"email": "help@example.com"}
                    }
                }));
            then.status(204);
        })
        .await;
    let body = SenderDetailsConfig {
        sender_details: SenderDetails {
            from: EmailAddress {
                name: None,
                email: String::from("no-reply@example.com"),
            },
            reply_to: Some(EmailAddress {
                name: None,
                email: String::from("help@example.com"),
            }),
            link_expiration_sec: None,
        },
    };
    client.set_sender_details(&body, None).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_password_regex_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let regex = exchange!(
        server,
        GET,
        "config/cloud_directory/password_regex",
        "GetCloudDirectoryPasswordRegex",
        json!({
            "regex": "^.{8,}$",
            "base64_encoded_regex": "Xi57OCx9JA==",
            "error_message": "too short"
        }),
        client.get_password_regex(None),
    );
    assert_eq!(regex.base64_encoded_regex.as_deref(), Some("Xi57OCx9JA=="));
    assert_eq!(regex.error_message.as_deref(), Some("too short"));

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/cloud_directory/password_regex"))
                .header(ANALYTICS, analytics("SetCloudDirectoryPasswordRegex"))
                .json_body(json!({
                    "regex": "^.{12,}$",
                    "error_message": "use 12 characters"
                }));
            then.status(200).json_body(json!({
                "regex": "^.{12,}$",
                "error_message": "use 12 characters"
            }));
        })
        .await;
    let body = PasswordRegexConfig {
        regex: Some(String::from("^.{12,}$")),
        error_message: Some(String::from("use 12 characters")),
        ..Default::default()
    };
    let updated =
        client.set_password_regex(&body, None).await.unwrap().into_inner();
    mock.assert_async().await;
    assert_eq!(updated, body);
}

#[tokio::test]
async fn test_email_dispatcher_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let dispatcher = exchange!(
        server,
        GET,
        "config/cloud_directory/email_dispatcher",
        "GetCloudDirectoryEmailDispatcher",
        json!({"provider": "sendgrid", "sendgrid": {"apiKey": "SG.key"}}),
        client.get_email_dispatcher(None),
    );
    assert_eq!(dispatcher.provider, EmailProvider::Sendgrid);
    assert_eq!(
        dispatcher.sendgrid.as_ref().map(|s| s.api_key.as_str()),
        Some("SG.key")
    );

    let custom = EmailDispatcherConfig {
        provider: EmailProvider::Custom,
        sendgrid: None,
        custom: Some(CustomDispatcherConfig {
            url: String::from("https://mail.example.com/send"),
            authorization: DispatcherAuthorization {
                authorization_type: DispatcherAuthorizationType::Basic,
                value: None,
                username: Some(String::from("dunder")),
                password: Some(String::from("mifflin")),
            },
        }),
    };
    let wire = json!({
        "provider": "custom",
        "custom": {
            "url": "https://mail.example.com/send",
            "authorization": {
                "type": "basic",
                "username": "dunder",
                "password": "mifflin"
            }
        }
    });

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/cloud_directory/email_dispatcher"))
                .header(
                    ANALYTICS,
                    analytics("SetCloudDirectoryEmailDispatcher"),
                )
                .json_body(wire.clone());
            then.status(200).json_body(wire.clone());
        })
        .await;
    let updated =
        client.set_email_dispatcher(&custom, None).await.unwrap().into_inner();
    mock.assert_async().await;
    assert_eq!(updated, custom);

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("config/cloud_directory/email_dispatcher/test"))
                .header(ANALYTICS, analytics("EmailSettingTest"))
                .json_body(json!({
                    "emailTo": "jim@example.com",
                    "emailSettings": wire,
                    "senderDetails": {
                        "from": {"email": "no-reply@example.com"}
                    }
                }));
            then.status(200).json_body(json!({
                "success": true,
                "dispatcherStatusCode": 202
            }));
        })
        .await;
    let body = EmailSettingsTestRequest {
        email_to: String::from("jim@example.com"),
        email_settings: custom,
        sender_details: SenderDetails {
            from: EmailAddress {
                name: None,
                email: String::from("no-reply@example.com"),
            },
            ..Default::default()
        },
    };
    let result =
        client.email_setting_test(&body, None).await.unwrap().into_inner();
    mock.assert_async().await;
    assert!(result.success);
    assert_eq!(result.dispatcher_status_code, Some(202));
}

#[tokio::test]
async fn test_advanced_password_management_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);
    let wire = json!({
        "advancedPasswordManagement": {
            "enabled": true,
            "passwordReuse": {
                "enabled": true,
                "config": {"maxPasswordReuse": 4}
            },
            "preventPasswordWithUsername": {"enabled": true},
            "passwordExpiration": {
                "enabled": false,
                "config": {"daysToExpire": 30}
            },
            "lockOutPolicy": {
                "enabled": true,
                "config": {"lockOutTimeSec": 1800, "numOfAttempts": 3}
            },
            "minPasswordChangeInterval": {
                "enabled": true,
                "config": {"minHoursToChangePassword": 24}
            }
        }
    });

    let config: AdvancedPasswordManagementConfig = exchange!(
        server,
        GET,
        "config/cloud_directory/advanced_password_management",
        "GetCloudDirectoryAdvancedPasswordManagement",
        wire.clone(),
        client.get_advanced_password_management(None),
    );
    let policy = &config.advanced_password_management;
    assert_eq!(
        policy.password_reuse.config.as_ref().map(|c| c.max_password_reuse),
        Some(4)
    );
    assert_eq!(
        policy.lock_out_policy.config.as_ref().map(|c| c.num_of_attempts),
        Some(3)
    );
    assert!(policy.prevent_password_with_username.enabled);
    assert_eq!(
        policy
            .min_password_change_interval
            .as_ref()
            .and_then(|p| p.config.as_ref())
            .map(|c| c.min_hours_to_change_password),
        Some(24)
    );

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path(
                    "config/cloud_directory/advanced_password_management",
                ))
                .header(
                    ANALYTICS,
                    analytics("SetCloudDirectoryAdvancedPasswordManagement"),
                )
                .json_body(wire.clone());
            then.status(200).json_body(wire.clone());
        })
        .await;
    let updated = client
        .set_advanced_password_management(&config, None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;
    assert_eq!(updated, config);
}

#[tokio::test]
async fn test_action_url_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let url = exchange!(
        server,
        GET,
        "config/cloud_directory/action_url/on_user_verified",
        "GetCloudDirectoryActionURL",
        json!({"actionUrl": "https://example.com/verified"}),
        client.get_action_url(ActionUrlAction::OnUserVerified, None),
    );
    assert_eq!(url.action_url, "https://example.com/verified");

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path(
                    "config/cloud_directory/action_url/on_reset_password",
                ))
                .header(ANALYTICS, analytics("SetCloudDirectoryAction"))
                .json_body(json!({"actionUrl": "https://example.com/reset"}));
            then.status(200)
                .json_body(json!({"actionUrl": "https://example.com/reset"}));
        })
        .await;
    let body =
        ActionUrl { action_url: String::from("https://example.com/reset") };
    let updated = client
        .set_action_url(ActionUrlAction::OnResetPassword, &body, None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;
    assert_eq!(updated, body);

    let error = client
        .set_action_url(
            ActionUrlAction::OnResetPassword,
            &ActionUrl::default(),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(error, Error::InvalidRequest(_)));

    exchange!(
        server,
        DELETE,
        "config/cloud_directory/action_url/on_user_verified",
        "DeleteActionURL",
        json!({}),
        client.delete_action_url(ActionUrlAction::OnUserVerified, None),
    );
}

#[tokio::test]
async fn test_sso_and_rate_limit_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let sso = exchange!(
        server,
        GET,
        "config/cloud_directory/sso",
        "GetSSOConfig",
        json!({
            "isActive": true,
            "inactivityTimeoutSeconds": 86400,
            "logoutRedirectUris": ["https://example.com/bye"]
        }),
        client.get_sso_config(None),
    );
    assert_eq!(sso.inactivity_timeout_seconds, Some(86400));
    assert_eq!(sso.logout_redirect_uris, ["https://example.com/bye"]);

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/cloud_directory/sso"))
                .header(ANALYTICS, analytics("UpdateSSOConfig"))
                .json_body(json!({
                    "isActive": false,
                    "logoutRedirectUris": []
                }));
            then.status(200).json_body(json!({"isActive": false}));
        })
        .await;
    let updated = client
        .update_sso_config(&SsoConfig::default(), None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;
    assert!(!updated.is_active);

    let limits = exchange!(
        server,
        GET,
        "config/cloud_directory/rate_limit",
        "GetRateLimitConfig",
        json!({"signUpLimitPerMinute": 50, "signInLimitPerMinute": 60}),
        client.get_rate_limit_config(None),
    );
    assert_eq!(limits.sign_up_limit_per_minute, 50);
    assert_eq!(limits.sign_in_limit_per_minute, 60);

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/cloud_directory/rate_limit"))
                .header(ANALYTICS, analytics("UpdateRateLimitConfig"))
                .json_body(json!({
                    "signUpLimitPerMinute": 10,
                    "signInLimitPerMinute": 20
                }));
            then.status(200).json_body(json!({
                "signUpLimitPerMinute": 10,
                "signInLimitPerMinute": 20
            }));
        })
        .await;
    let body = RateLimitConfig {
        sign_up_limit_per_minute: 10,
        sign_in_limit_per_minute: 20,
    };
    let updated =
        client.update_rate_limit_config(&body, None).await.unwrap();
    mock.assert_async().await;
    assert_eq!(updated.into_inner(), body);
}

#[tokio::test]
async fn test_mfa_config_and_channel_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let config = exchange!(
        server,
        GET,
        "config/cloud_directory/mfa",
        "GetMFAConfig",
        json!({"isActive": true, "config": {"skipAfterSignUp": true}}),
        client.get_mfa_config(None),
    );
    assert!(config.is_active);
    assert_eq!(config.config, Some(json!({"skipAfterSignUp": true})));

    exchange!(
        server,
        PUT,
        "config/cloud_directory/mfa",
        "UpdateMFAConfig",
        json!({"isActive": false}),
        client.update_mfa_config(&MfaConfig::default(), None),
    );

    let channels = exchange!(
        server,
        GET,
        "config/cloud_directory/mfa/channels",
        "ListChannels",
        json!({
            "channels": [
                {"type": "email", "isActive": true},
                {"type": "nexmo", "isActive": false}
            ]
        }),
        client.list_channels(None),
    );
    assert_eq!(channels.channels[1].channel_type, MfaChannelType::Nexmo);

    let channel = exchange!(
        server,
        GET,
        "config/cloud_directory/mfa/channels/nexmo",
        "GetChannel",
        json!({
            "type": "nexmo",
            "isActive": true,
            "config": {"key": "k", "secret": "s", "from": "Dunder"}
        }),
        client.get_channel(MfaChannelType::Nexmo, None),
    );
    assert_eq!(channel.config.map(|c| c.from), Some(String::from("Dunder")));

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/cloud_directory/mfa/channels/nexmo"))
                .header(ANALYTICS, analytics("UpdateChannel"))
                .json_body(json!({
                    "isActive": true,
                    "config": {"key": "k2", "secret": "s2", "from": "DM"}
                }));
            then.status(200).json_body(json!({
                "type": "nexmo",
                "isActive": true
            }));
        })
        .await;
    let mut body = UpdateMfaChannelRequest {
        is_active: true,
        config: Some(MfaChannelConfig {
            key: String::from("k2"),
            secret: String::from("s2"),
            from: String::from("DM"),
        }),
    };
    let updated = client
        .update_channel(MfaChannelType::Nexmo, &body, None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;
    assert!(updated.is_active);

    body.config = None;
    let error = client
        .update_channel(MfaChannelType::Nexmo, &body, None)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::InvalidRequest(_)));

    exchange!(
        server,
        PUT,
        "config/cloud_directory/mfa/channels/email",
        "UpdateChannel",
        json!({"type": "email", "isActive": true}),
        client.update_channel(MfaChannelType::Email, &body, None),
    );
}

#[tokio::test]
async fn test_mfa_extension_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let extension = exchange!(
        server,
        GET,
        "config/cloud_directory/mfa/extensions/premfa",
        "GetExtensionConfig",
        json!({
            "isActive": true,
            "config": {
                "url": "https://hooks.example.com/premfa",
                "headers": {"x-token": "t"}
            }
        }),
        client.get_extension(MfaExtensionName::Premfa, None),
    );
    let target = extension.config.unwrap();
    assert_eq!(target.url, "https://hooks.example.com/premfa");
    assert_eq!(target.headers.unwrap()["x-token"], "t");

    let body = ExtensionConfig {
        is_active: true,
        config: Some(ExtensionTarget {
            url: String::from("https://hooks.example.com/postmfa"),
            headers: None,
        }),
    };
    exchange!(
        server,
        PUT,
        "config/cloud_directory/mfa/extensions/postmfa",
        "UpdateExtensionConfig",
        json!({"isActive": true}),
        client.update_extension_config(MfaExtensionName::Postmfa, &body, None),
    );

    let blank = ExtensionConfig {
        is_active: true,
        config: Some(ExtensionTarget::default()),
    };
    let error = client
        .update_extension_config(MfaExtensionName::Postmfa, &blank, None)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::InvalidRequest(_)));

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path(
                    "config/cloud_directory/mfa/extensions/premfa/active",
                ))
                .header(ANALYTICS, analytics("UpdateExtensionActive"))
                .json_body(json!({"isActive": false}));
            then.status(200).json_body(json!({"isActive": false}));
        })
        .await;
    let active = client
        .update_extension_active(
            MfaExtensionName::Premfa,
            &ExtensionActive::default(),
            None,
        )
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;
    assert!(!active.is_active);

    let result = exchange!(
        server,
        POST,
        "config/cloud_directory/mfa/extensions/premfa/test",
        "PostExtensionsTest",
        json!({
            "statusCode": 200,
            "headers": {"content-type": "application/json"}
        }),
        client.post_extensions_test(MfaExtensionName::Premfa, None),
    );
    assert_eq!(result.status_code, Some(200));
    assert!(result.headers.is_some());
}

#[tokio::test]
async fn test_social_and_custom_idp_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let facebook = exchange!(
        server,
        GET,
        "config/idps/facebook",
        "GetFacebookIDP",
        json!({
            "isActive": true,
            "config": {"idpId": "fb-app", "secret": "fb-secret"},
            "redirectURL": "https://appid.example.com/callback"
        }),
        client.get_facebook_idp(None),
    );
    assert_eq!(
        facebook.redirect_url.as_deref(),
        Some("https://appid.example.com/callback")
    );
    assert_eq!(facebook.config.map(|c| c.idp_id), Some(String::from("fb-app")));

    let body = SocialIdpConfig {
        is_active: true,
        config: Some(SocialIdpCredentials {
            idp_id: String::from("g-app"),
            secret: String::from("g-secret"),
        }),
        redirect_url: None,
    };

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/idps/facebook"))
                .header(ANALYTICS, analytics("SetFacebookIDP"))
                .json_body(json!({
                    "isActive": true,
                    "config": {"idpId": "g-app", "secret": "g-secret"}
                }));
            then.status(200).json_body(json!({"isActive": true}));
        })
        .await;
    client.set_facebook_idp(&body, None).await.unwrap();
    mock.assert_async().await;

    let google = exchange!(
        server,
        GET,
        "config/idps/google",
        "GetGoogleIDP",
        json!({"isActive": false}),
        client.get_google_idp(None),
    );
    assert!(!google.is_active);

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/idps/google"))
                .header(ANALYTICS, analytics("SetGoogleIDP"))
                .json_body(json!({
                    "isActive": true,
                    "config": {"idpId": "g-app", "secret": "g-secret"}
                }));
            then.status(200).json_body(json!({
                "isActive": true,
                "redirectURL": "https://appid.example.com/google"
            }));
        })
        .await;
    let updated = client.set_google_idp(&body, None).await.unwrap();
    mock.assert_async().await;
    assert_eq!(
        updated.redirect_url.as_deref(),
        Some("https://appid.example.com/google")
    );

    let custom = exchange!(
        server,
        GET,
        "config/idps/custom",
        "GetCustomIDP",
        json!({"isActive": true, "config": {"publicKey": "PEM"}}),
        client.get_custom_idp(None),
    );
    assert_eq!(
        custom.config.and_then(|c| c.public_key).as_deref(),
        Some("PEM")
    );

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/idps/custom"))
                .header(ANALYTICS, analytics("SetCustomIDP"))
                .json_body(json!({
                    "isActive": true,
                    "config": {"publicKey": "PEM2"}
                }));
            then.status(200).json_body(json!({"isActive": true}));
        })
        .await;
    let body = CustomIdpConfig {
        is_active: true,
        config: Some(CustomIdpSettings {
            public_key: Some(String::from("PEM2")),
        }),
    };
    client.set_custom_idp(&body, None).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cloud_directory_idp_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);
    let wire = json!({
        "isActive": true,
        "config": {
            "selfServiceEnabled": true,
            "signUpEnabled": false,
            "interactions": {
                "identityConfirmation": {
                    "accessMode": "RESTRICTIVE",
                    "methods": ["email"]
                },
                "welcomeEnabled": true,
                "resetPasswordEnabled": true,
                "resetPasswordNotificationEnable": false
            },
            "identityField": "userName"
        }
    });

    let idp: CloudDirectoryIdpConfig = exchange!(
        server,
        GET,
        "config/idps/cloud_directory",
        "GetCloudDirectoryIDP",
        wire.clone(),
        client.get_cloud_directory_idp(None),
    );
    let settings = idp.config.as_ref().unwrap();
    assert_eq!(settings.identity_field, Some(IdentityField::UserName));
    assert_eq!(
        settings.interactions.identity_confirmation.access_mode,
        IdentityConfirmationAccessMode::Restrictive
    );
    assert!(!settings.interactions.reset_password_notification_enable);

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/idps/cloud_directory"))
                .header(ANALYTICS, analytics("SetCloudDirectoryIDP"))
                .json_body(wire.clone());
            then.status(200).json_body(wire.clone());
        })
        .await;
    let updated = client
        .set_cloud_directory_idp(&idp, None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;
    assert_eq!(updated, idp);
}

#[tokio::test]
async fn test_saml_idp_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let saml = exchange!(
        server,
        GET,
        "config/idps/saml",
        "GetSAMLIDP",
        json!({
            "isActive": true,
            "config": {
                "entityID": "https://idp.example.com",
                "signInUrl": "https://idp.example.com/sso",
                "certificates": ["MIIC"],
                "authnContext": {"class": ["urn:x"], "comparison": "exact"},
                "signRequest": true
            }
        }),
        client.get_saml_idp(None),
    );
    let settings = saml.config.unwrap();
    assert_eq!(settings.entity_id, "https://idp.example.com");
    assert_eq!(settings.sign_request, Some(true));
    assert_eq!(
        settings.authn_context.and_then(|a| a.comparison).as_deref(),
        Some("exact")
    );

    let body = SamlIdpConfig {
        is_active: true,
        config: Some(SamlSettings {
            entity_id: String::from("https://idp.example.com"),
            sign_in_url: String::from("https://idp.example.com/sso"),
            certificates: vec![String::from("MIIC")],
            display_name: Some(String::from("Corporate")),
            ..Default::default()
        }),
    };
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("config/idps/saml"))
                .header(ANALYTICS, analytics("SetSAMLIDP"))
                .json_body(json!({
                    "isActive": true,
                    "config": {
                        "entityID": "https://idp.example.com",
                        "signInUrl": "https://idp.example.com/sso",
                        "certificates": ["MIIC"],
                        "displayName": "Corporate"
                    }
                }));
            then.status(200).json_body(json!({
                "isActive": true,
                "config": {
                    "entityID": "https://idp.example.com",
                    "signInUrl": "https://idp.example.com/sso",
                    "certificates": ["MIIC"]
                },
                "validation_data": {
                    "certificates": [
                        {"certificate_index": 0, "expire_in_days": 42}
                    ]
                }
            }));
        })
        .await;
    let reply = client.set_saml_idp(&body, None).await.unwrap().into_inner();
    mock.assert_async().await;

    let validation = reply.validation_data.unwrap();
    assert_eq!(validation.certificates[0].certificate_index, 0);
    assert_eq!(validation.certificates[0].expire_in_days, 42);

    let mut missing_entity = body.clone();
    if let Some(settings) = missing_entity.config.as_mut() {
        settings.entity_id = String::new();
    }
    let error =
        client.set_saml_idp(&missing_entity, None).await.unwrap_err();
    assert!(matches!(error, Error::InvalidRequest(_)));
    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_role_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);
    let role = json!({
        "id": "r1",
        "name": "manager",
        "description": "Runs the branch",
        "access": [{"application_id": "c1", "scopes": ["read"]}]
    });

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("roles"))
                .header(ANALYTICS, analytics("CreateRole"))
                .json_body(json!({
                    "name": "manager",
                    "description": "Runs the branch",
                    "access": [{"application_id": "c1", "scopes": ["read"]}]
                }));
            then.status(201).json_body(role.clone());
        })
        .await;
    let request = RoleRequest::new("manager")
        .description("Runs the branch")
        .grant("c1", ["read"]);
    let created = client.create_role(&request, None).await.unwrap();
    mock.assert_async().await;
    assert_eq!(created.status(), 201);
    assert_eq!(created.access[0].application_id, "c1");

    let fetched = exchange!(
        server,
        GET,
        "roles/r1",
        "GetRole",
        role.clone(),
        client.get_role("r1", None),
    );
    assert_eq!(fetched.description.as_deref(), Some("Runs the branch"));

    let updated = exchange!(
        server,
        PUT,
        "roles/r1",
        "UpdateRole",
        json!({"id": "r1", "name": "regional manager"}),
        client.update_role(
            "r1",
            &RoleRequest::new("regional manager"),
            None,
        ),
    );
    assert_eq!(updated.name, "regional manager");
    assert!(updated.access.is_empty());
}

#[tokio::test]
async fn test_nominate_user_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("users"))
                .header(ANALYTICS, analytics("UsersNominateUser"))
                .json_body(json!({
                    "idp": "saml",
                    "idp-identity": "pam@example.com",
                    "profile": {"attributes": {"desk": "reception"}}
                }));
            then.status(201).json_body(json!({"id": "p7"}));
        })
        .await;

    let client = client(&server);
    let mut body = NominateUserRequest {
        idp: String::from("saml"),
        idp_identity: String::from("pam@example.com"),
        profile: Some(ProfileAttributes {
            attributes: attributes(json!({"desk": "reception"})),
        }),
    };

    let nominated = client.nominate_user(&body, None).await.unwrap();
    mock.assert_async().await;
    assert_eq!(nominated.status(), 201);
    assert_eq!(nominated.id, "p7");

    body.idp_identity = String::new();
    let error = client.nominate_user(&body, None).await.unwrap_err();
    assert!(matches!(error, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn test_user_profile_export_and_import() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(path("users/export"))
                .query_param("startIndex", "10")
                .query_param("count", "5")
                .header(ANALYTICS, analytics("UserProfilesExport"));
            then.status(200).json_body(json!({
                "itemsPerPage": 1,
                "totalResults": 11,
                "requestOptions": {"startIndex": 10, "count": 5},
                "users": [{
                    "id": "p1",
                    "identities": [{"provider": "saml", "id": "pam"}],
                    "attributes": {"desk": "reception"},
                    "hashedIdpId": "abc",
                    "hashedEmail": "def",
                    "roles": ["receptionist"]
                }]
            }));
        })
        .await;
    let export = client
        .export_user_profiles(&PageRequest::new(10, 5), None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;

    assert_eq!(export.total_results, 11);
    let profile = &export.users[0];
    assert_eq!(profile.hashed_idp_id.as_deref(), Some("abc"));
    assert_eq!(profile.hashed_email.as_deref(), Some("def"));
    assert_eq!(profile.roles, ["receptionist"]);

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(path("users/import"))
                .header(ANALYTICS, analytics("UserProfilesImport"))
                .json_body(json!({
                    "users": [{"id": "p1", "hashedEmail": "def", "roles": []}]
                }));
            then.status(200).json_body(json!({"added": 1, "failed": 0}));
        })
        .await;
    let body = UserProfilesImportRequest {
        users: vec![ExportedUserProfile {
            id: String::from("p1"),
            hashed_email: Some(String::from("def")),
            ..Default::default()
        }],
    };
    let outcome = client
        .import_user_profiles(&body, None)
        .await
        .unwrap()
        .into_inner();
    mock.assert_async().await;

    assert_eq!(outcome.added, 1);
    assert!(outcome.fail_reasons.is_empty());
}

#[tokio::test]
async fn test_user_profile_operations() {
    let server = MockServer::start_async().await;
    let client = client(&server);

    exchange!(
        server,
        DELETE,
        "users/p1",
        "UsersDeleteUserProfile",
        json!({}),
        client.delete_user_profile("p1", None),
    );

    exchange!(
        server,
        POST,
        "users/p1/revoke_refresh_token",
        "UsersRevokeRefreshToken",
        json!({}),
        client.revoke_refresh_token("p1", None),
    );

    let profile = exchange!(
        server,
        GET,
        "users/p1/profile",
        "UsersGetUserProfile",
        json!({"attributes": {"desk": "reception"}}),
        client.get_user_profile("p1", None),
    );
    assert_eq!(profile.attributes["desk"], "reception");

    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path(path("users/p1/profile"))
                .header(ANALYTICS, analytics("UsersSetUserProfile"))
                .json_body(json!({"attributes": {"desk": "sales"}}));
            then.status(200)
                .json_body(json!({"attributes": {"desk": "sales"}}));
        })
        .await;
    let body =
        ProfileAttributes { attributes: attributes(json!({"desk": "sales"})) };
    let updated =
        client.set_user_profile("p1", &body, None).await.unwrap();
    mock.assert_async().await;
    assert_eq!(updated.into_inner(), body);

    let roles = exchange!(
        server,
        GET,
        "users/p1/roles",
        "GetUserRoles",
        json!({"roles": [{"id": "r1", "name": "receptionist"}]}),
        client.get_user_roles("p1", None),
    );
    assert_eq!(roles.roles[0].id, "r1");
}
