use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use serde_json::json;
use std::future::{ready, Ready};
use std::rc::Rc;

use super::auth::unauthorized;
use crate::database::Store;
use crate::models::user::Role;
use crate::services::{token_service::Claims, user_service};

/// Role gate, mounted after `AuthMiddleware`. The required role is checked
/// against the STORED user for the token's email; a caller-supplied email is
/// never consulted here, so a forged path parameter cannot escalate.
pub struct RoleGuard {
    required: Role,
}

impl RoleGuard {
    pub fn admin() -> Self {
        RoleGuard {
            required: Role::Admin,
        }
    }

    pub fn instructor() -> Self {
        RoleGuard {
            required: Role::Instructor,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGuardService {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct RoleGuardService<S> {
    service: Rc<S>,
    required: Role,
}

fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(json!({
        "error": true,
        "message": "forbidden message",
    }))
}

impl<S, B> Service<ServiceRequest> for RoleGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required = self.required;

        Box::pin(async move {
            let claims = req.extensions().get::<Claims>().cloned();
            let Some(claims) = claims else {
                // Guard mounted without the token check in front of it.
                let (request, _payload) = req.into_parts();
                return Ok(ServiceResponse::new(request, unauthorized()).map_into_right_body());
            };

            let Some(store) = req.app_data::<web::Data<dyn Store>>().cloned() else {
                log::error!("❌ RoleGuard mounted without a store in app data");
                let (request, _payload) = req.into_parts();
                return Ok(ServiceResponse::new(request, forbidden()).map_into_right_body());
            };

            match user_service::role_for_email(store.get_ref(), &claims.email).await {
                Ok(role) if role == required => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Ok(_) => {
                    let (request, _payload) = req.into_parts();
                    Ok(ServiceResponse::new(request, forbidden()).map_into_right_body())
                }
                Err(e) => {
                    log::error!("❌ Role lookup failed: {}", e);
                    let (request, _payload) = req.into_parts();
                    Ok(ServiceResponse::new(request, forbidden()).map_into_right_body())
                }
            }
        })
    }
}
