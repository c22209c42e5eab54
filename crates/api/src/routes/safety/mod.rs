use rocket::Route;
use rocket_okapi::okapi::openapi3::OpenApi;

mod delete_report;
mod edit_report;
mod fetch_report;
mod fetch_reports;
mod remove_content;
mod report_content;
mod restore_report;
mod stats;

pub fn routes() -> (Vec<Route>, OpenApi) {
    openapi_get_routes_spec![
        // Reports
        report_content::report_content,
        fetch_reports::fetch_reports,
        fetch_report::fetch_report,
        edit_report::edit_report,
        delete_report::delete_report,
        restore_report::restore_report,
        // Moderation
        remove_content::remove_content,
        stats::stats,
    ]
}
