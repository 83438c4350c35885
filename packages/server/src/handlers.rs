//! HTTP handler functions for the dashboard API.

use actix_web::{HttpResponse, web};
use zurich_pop_dashboard::SelectionParams;
use zurich_pop_server_models::{ApiError, ApiHealth, FiguresQueryParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        record_count: state.controller.dataset().len(),
    })
}

/// `GET /api/options`
///
/// Returns the districts, years, and date bounds offered by the controls,
/// plus their initial values.
pub async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.controller.options())
}

/// `GET /api/figures`
///
/// Recomputes the four dashboard figures for the given control values.
pub async fn figures(
    state: web::Data<AppState>,
    params: web::Query<FiguresQueryParams>,
) -> HttpResponse {
    let params = params.into_inner();
    let params = SelectionParams {
        district: params.district,
        from: params.from,
        to: params.to,
        year: params.year,
    };

    let selection = match state.controller.resolve(&params) {
        Ok(selection) => selection,
        Err(e) => {
            log::warn!("Rejected figures request: {e}");
            return HttpResponse::BadRequest().json(ApiError::new(e.to_string()));
        }
    };

    let controller = state.controller.clone();
    match web::block(move || controller.update(&selection)).await {
        Ok(figures) => HttpResponse::Ok().json(figures),
        Err(e) => {
            log::error!("Failed to compute figures: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to compute figures"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test, web};
    use chrono::NaiveDate;
    use zurich_pop_dashboard::DashboardController;
    use zurich_pop_dataset::Dataset;
    use zurich_pop_population_models::{Origin, PopulationRecord, Sex};

    use crate::{AppState, api_routes};

    fn record(origin: Origin, sex: Sex, age_band: &str, count: u64) -> PopulationRecord {
        PopulationRecord {
            date: NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
            district: "Kreis 1".to_string(),
            origin,
            sex,
            age_band: age_band.to_string(),
            count,
        }
    }

    fn state() -> web::Data<AppState> {
        let dataset = Dataset::from_records(vec![
            record(Origin::Swiss, Sex::Male, "0-19", 500),
            record(Origin::Foreign, Sex::Female, "20-39", 300),
        ]);
        web::Data::new(AppState {
            controller: DashboardController::new(Arc::new(dataset)),
        })
    }

    #[actix_web::test]
    async fn figures_for_kreis_1() {
        let app =
            test::init_service(App::new().app_data(state()).configure(api_routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/figures?district=Kreis%201&from=2020-01-01&to=2020-12-31&year=2020")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["population"]["data"][0]["y"], serde_json::json!([800.0]));
        assert_eq!(body["foreigners"]["data"][0]["y"], serde_json::json!([0.375]));
        assert_eq!(body["men"]["data"][0]["y"], serde_json::json!([0.625]));
        assert_eq!(
            body["ageDistribution"]["data"][0]["values"],
            serde_json::json!([500, 300])
        );
    }

    #[actix_web::test]
    async fn figures_default_to_full_range() {
        let app =
            test::init_service(App::new().app_data(state()).configure(api_routes)).await;

        let req = test::TestRequest::get().uri("/api/figures").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["population"]["layout"]["title"]["text"],
            "Population in Kreis 1"
        );
        assert_eq!(
            body["population"]["data"][0]["x"],
            serde_json::json!(["2020-01-31"])
        );
    }

    #[actix_web::test]
    async fn malformed_year_is_bad_request() {
        let app =
            test::init_service(App::new().app_data(state()).configure(api_routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/figures?year=soon")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("year"));
    }

    #[actix_web::test]
    async fn options_list_sentinel_last() {
        let app =
            test::init_service(App::new().app_data(state()).configure(api_routes)).await;

        let req = test::TestRequest::get().uri("/api/options").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["districts"], serde_json::json!(["Kreis 1", "Zurich"]));
        assert_eq!(body["defaults"]["year"], 2020);
        assert_eq!(body["minDate"], "2020-01-31");
    }

    #[actix_web::test]
    async fn health_reports_record_count() {
        let app =
            test::init_service(App::new().app_data(state()).configure(api_routes)).await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["healthy"], true);
        assert_eq!(body["recordCount"], 2);
    }
}
