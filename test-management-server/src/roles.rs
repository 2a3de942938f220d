// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use appid_management::RoleRequest;

#[derive(Deserialize, JsonSchema)]
pub struct RolePathParam {
    tenant_id: String,
    role_id: String,
}

#[endpoint {
    method = GET,
    path = "/management/v4/{tenant_id}/roles"
}]
pub async fn list_roles(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<TenantPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx
        .authorize(&rqctx)
        .map(|()| apictx.store.list_roles(&path_param.tenant_id));

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = POST,
    path = "/management/v4/{tenant_id}/roles"
}]
pub async fn create_role(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<TenantPathParam>,
    body: TypedBody<RoleRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.create_role(&path_param.tenant_id, request)
    });

    respond(result, StatusCode::CREATED)
}

#[endpoint {
    method = GET,
    path = "/management/v4/{tenant_id}/roles/{role_id}"
}]
pub async fn get_role(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<RolePathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.get_role(&path_param.tenant_id, &path_param.role_id)
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = PUT,
    path = "/management/v4/{tenant_id}/roles/{role_id}"
}]
pub async fn update_role(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<RolePathParam>,
    body: TypedBody<RoleRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.update_role(
            &path_param.tenant_id,
            &path_param.role_id,
            request,
        )
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = DELETE,
    path = "/management/v4/{tenant_id}/roles/{role_id}"
}]
pub async fn delete_role(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<RolePathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.delete_role(&path_param.tenant_id, &path_param.role_id)
    });

    respond_no_content(result)
}
