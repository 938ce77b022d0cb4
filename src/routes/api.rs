use actix_web::{HttpResponse, Responder, get, post, web};
use log::error;
use serde::Deserialize;
use validator::Validate;

use crate::db::DbPool;
use crate::domain::feedback::NewFeedbackRecord;
use crate::dto::matching::{MatchSuggestionDto, SubmitOutcomeDto};
use crate::forms::feedback::FeedbackForm;
use crate::forms::products::SubmitProductForm;
use crate::models::config::OfferPolicy;
use crate::repository::DieselRepository;
use crate::services::catalog::{SuggestQueryParams, suggest_catalog_matches};
use crate::services::feedback::record_feedback;
use crate::services::offers::submit_product;
use crate::services::ServiceError;

#[derive(Deserialize, Debug)]
struct ApiV1SuggestQueryParams {
    q: String,
    brand: Option<String>,
    category_id: Option<i32>,
}

#[get("/v1/catalog/suggest")]
pub async fn api_v1_catalog_suggest(
    params: web::Query<ApiV1SuggestQueryParams>,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let repo = DieselRepository::new(pool.get_ref().clone());

    let params = SuggestQueryParams {
        query: params.q.clone(),
        brand: params.brand.clone(),
        category_id: params.category_id,
    };

    match suggest_catalog_matches(&params, &repo) {
        Ok(suggestions) => HttpResponse::Ok().json(suggestions),
        Err(ServiceError::InvalidInput(message)) => HttpResponse::BadRequest().json(message),
        Err(e) => {
            // The typeahead degrades to "no suggestions" rather than breaking
            // the submission form.
            error!("Failed to build catalog suggestions: {e}");
            HttpResponse::Ok().json(Vec::<MatchSuggestionDto>::new())
        }
    }
}

#[post("/v1/products")]
pub async fn api_v1_submit_product(
    form: web::Json<SubmitProductForm>,
    pool: web::Data<DbPool>,
    policy: web::Data<OfferPolicy>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(e) = form.validate() {
        return HttpResponse::BadRequest().json(e.to_string());
    }

    let submission = match form.into_submission() {
        Ok(submission) => submission,
        Err(e) => return HttpResponse::BadRequest().json(e.to_string()),
    };

    let repo = DieselRepository::new(pool.get_ref().clone());

    match submit_product(&submission, policy.get_ref(), &repo) {
        Ok(outcome) => HttpResponse::Created().json(SubmitOutcomeDto {
            catalog_id: outcome.resolution.catalog_id.get(),
            catalog_created: outcome.resolution.created,
            offer_id: outcome.offer.id.get(),
            sku: outcome.offer.sku.as_str().to_string(),
        }),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(ServiceError::InvalidInput(message)) => HttpResponse::BadRequest().json(message),
        Err(e) => {
            error!("Failed to process product submission: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/v1/feedback")]
pub async fn api_v1_record_feedback(
    form: web::Json<FeedbackForm>,
    pool: web::Data<DbPool>,
) -> impl Responder {
    let form = form.into_inner();
    if let Err(e) = form.validate() {
        return HttpResponse::BadRequest().json(e.to_string());
    }

    let record = match NewFeedbackRecord::try_from(form) {
        Ok(record) => record,
        Err(e) => return HttpResponse::BadRequest().json(e.to_string()),
    };

    let repo = DieselRepository::new(pool.get_ref().clone());

    match record_feedback(&record, &repo) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(e) => {
            error!("Failed to record feedback: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
