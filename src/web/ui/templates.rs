use askama::Template;
use askama_web::WebTemplate;

use crate::catalog::Satellite;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub satellites: Vec<Satellite>,
    pub trackable_norad_id: u32,
    /// False when the trackable satellite is not listed; the start button
    /// is rendered disabled.
    pub can_track: bool,
    pub refresh_seconds: u64,
}
