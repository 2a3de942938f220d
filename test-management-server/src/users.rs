// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use appid_management::UpdateRolesRequest;

#[derive(Deserialize, JsonSchema)]
pub struct ProfilePathParam {
    tenant_id: String,
    id: String,
}

#[endpoint {
    method = GET,
    path = "/management/v4/{tenant_id}/users/{id}/roles"
}]
pub async fn get_user_roles(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ProfilePathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).map(|()| {
        apictx.store.user_roles(&path_param.tenant_id, &path_param.id)
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = PUT,
    path = "/management/v4/{tenant_id}/users/{id}/roles"
}]
pub async fn update_user_roles(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ProfilePathParam>,
    body: TypedBody<UpdateRolesRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.set_user_roles(
            &path_param.tenant_id,
            &path_param.id,
            request,
        )
    });

    respond(result, StatusCode::OK)
}
