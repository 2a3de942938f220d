// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Every `config/...` resource is a JSON document: GET returns what was last
//! PUT, DELETE forgets it.

use super::*;

use serde_json::Value;

#[derive(Deserialize, JsonSchema)]
pub struct ConfigPathParam {
    tenant_id: String,
    path: Vec<String>,
}

impl ConfigPathParam {
    fn key(&self) -> String {
        self.path.join("/")
    }
}

#[endpoint {
    method = GET,
    path = "/management/v4/{tenant_id}/config/{path:.*}",
    unpublished = true,
}]
pub async fn get_document(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ConfigPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx.store.get_document(&path_param.tenant_id, &path_param.key())
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = PUT,
    path = "/management/v4/{tenant_id}/config/{path:.*}",
    unpublished = true,
}]
pub async fn put_document(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ConfigPathParam>,
    body: TypedBody<Value>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let document = body.into_inner();

    let result = apictx.authorize(&rqctx).map(|()| {
        apictx.store.put_document(
            &path_param.tenant_id,
            &path_param.key(),
            document,
        )
    });

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = DELETE,
    path = "/management/v4/{tenant_id}/config/{path:.*}",
    unpublished = true,
}]
pub async fn delete_document(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<ConfigPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.authorize(&rqctx).and_then(|()| {
        apictx
            .store
            .delete_document(&path_param.tenant_id, &path_param.key())
    });

    respond_no_content(result)
}
