use actix_web::{web, HttpResponse};

use crate::state::AppState;

pub async fn handler(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    state.handler.handle(&body).await
}
