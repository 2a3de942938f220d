// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use appid_management::CreateCloudDirectoryUserRequest;
use appid_management::ListCloudDirectoryUsersQuery;
use appid_management::UpdateCloudDirectoryUserRequest;

#[derive(Deserialize, JsonSchema)]
pub struct UserPathParam {
    tenant_id: String,
    user_id: String,
}

#[endpoint {
    method = GET,
    path = "/management/v4/{tenant_id}/cloud_directory/Users"
}]
pub async fn list_users(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<TenantPathParam>,
    query_params: Query<ListCloudDirectoryUsersQuery>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let query_params = query_params.into_inner();

    let result = apictx.authorize(&rqctx).map(|()| {
        apictx
            .store
            .list_cloud_directory_users(&path_param.tenant_id, &query_params)
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = POST,
    path = "/management/v4/{tenant_id}/cloud_directory/Users"
}]
pub async fn create_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<TenantPathParam>,
    body: TypedBody<CreateCloudDirectoryUserRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx
            .store
            .create_cloud_directory_user(&path_param.tenant_id, request)
    });

    respond(result, StatusCode::CREATED)
}

#[endpoint {
    method = GET,
    path = "/management/v4/{tenant_id}/cloud_directory/Users/{user_id}"
}]
pub async fn get_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.get_cloud_directory_user(
            &path_param.tenant_id,
            &path_param.user_id,
        )
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = PUT,
    path = "/management/v4/{tenant_id}/cloud_directory/Users/{user_id}"
}]
pub async fn update_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
    body: TypedBody<UpdateCloudDirectoryUserRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.update_cloud_directory_user(
            &path_param.tenant_id,
            &path_param.user_id,
            request,
        )
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = DELETE,
    path = "/management/v4/{tenant_id}/cloud_directory/Users/{user_id}"
}]
pub async fn delete_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.delete_cloud_directory_user(
            &path_param.tenant_id,
            &path_param.user_id,
        )
    });

    respond_no_content(result)
}
