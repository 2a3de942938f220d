// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use appid_management::ApplicationScopes;
use appid_management::RegisterApplicationRequest;
use appid_management::UpdateApplicationRequest;
use appid_management::UpdateRolesRequest;

#[derive(Deserialize, JsonSchema)]
pub struct ApplicationPathParam {
    tenant_id: String,
    client_id: String,
}

#[endpoint {
    method = GET,
    path = "/management/v4/{tenant_id}/applications"
}]
pub async fn list_applications(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<TenantPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx
        .authorize(&rqctx)
        .map(|()| apictx.store.list_applications(&path_param.tenant_id));

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = POST,
    path = "/management/v4/{tenant_id}/applications"
}]
pub async fn register_application(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<TenantPathParam>,
    body: TypedBody<RegisterApplicationRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.register_application(&path_param.tenant_id, request)
    });

    respond(result, StatusCode::CREATED)
}

#[endpoint {
    method = GET,
    path = "/management/v4/{tenant_id}/applications/{client_id}"
}]
pub async fn get_application(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ApplicationPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx
            .store
            .get_application(&path_param.tenant_id, &path_param.client_id)
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = PUT,
    path = "/management/v4/{tenant_id}/applications/{client_id}"
}]
pub async fn update_application(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ApplicationPathParam>,
    body: TypedBody<UpdateApplicationRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.update_application(
            &path_param.tenant_id,
            &path_param.client_id,
            request,
        )
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = DELETE,
    path = "/management/v4/{tenant_id}/applications/{client_id}"
}]
pub async fn delete_application(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ApplicationPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx
            .store
            .delete_application(&path_param.tenant_id, &path_param.client_id)
    });

    respond_no_content(result)
}

#[endpoint {
    method = GET,
    path = "/management/v4/{tenant_id}/applications/{client_id}/scopes"
}]
pub async fn get_application_scopes(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ApplicationPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx
            .store
            .application_scopes(&path_param.tenant_id, &path_param.client_id)
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = PUT,
    path = "/management/v4/{tenant_id}/applications/{client_id}/scopes"
}]
pub async fn put_application_scopes(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ApplicationPathParam>,
    body: TypedBody<ApplicationScopes>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.set_application_scopes(
            &path_param.tenant_id,
            &path_param.client_id,
            request,
        )
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = GET,
    path = "/management/v4/{tenant_id}/applications/{client_id}/roles"
}]
pub async fn get_application_roles(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ApplicationPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx
            .store
            .application_roles(&path_param.tenant_id, &path_param.client_id)
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = PUT,
    path = "/management/v4/{tenant_id}/applications/{client_id}/roles"
}]
pub async fn put_application_roles(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ApplicationPathParam>,
    body: TypedBody<UpdateRolesRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.set_application_roles(
            &path_param.tenant_id,
            &path_param.client_id,
            request,
        )
    });

    respond(result, StatusCode::OK)
}
