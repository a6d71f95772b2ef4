use axum::response::Html;
use maud::{html, Markup, DOCTYPE};

/// Routes advertised on the welcome page.
pub const API_ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

pub async fn welcome() -> Html<String> {
    Html(welcome_page().into_string())
}

fn welcome_page() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Climate App API" }
            }
            body {
                h1 { "Welcome to the Climate App API!" }
                p { "Available Routes:" }
                ul {
                    @for route in API_ROUTES {
                        li { code { (route) } }
                    }
                }
                p {
                    "Dates use the YYYY-MM-DD format. "
                    a href="/docs" { "API Docs" }
                }
            }
        }
    }
}
