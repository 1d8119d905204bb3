// handlers/public/root.rs - GET / handler

use serde::Serialize;

use crate::api::ApiResponse;

#[derive(Debug, Serialize)]
pub struct RootInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<&'static str>,
}

pub async fn root() -> ApiResponse<RootInfo> {
    ApiResponse::success(RootInfo {
        name: "Status Smoke",
        version: env!("CARGO_PKG_VERSION"),
        description: "Status application served by axum",
        endpoints: crate::app::ROUTES.to_vec(),
    })
}
