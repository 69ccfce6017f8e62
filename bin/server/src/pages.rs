//! HTML pages and htmx fragments.
//!
//! Names are interpolated without escaping. Callers pass only names read
//! from the cluster or path parameters the handlers have already checked
//! with [`is_dns_label`](deployment_restarter_cluster::is_dns_label) and
//! [`is_dns_subdomain`](deployment_restarter_cluster::is_dns_subdomain).

use axum::response::Html;
use axum_extra::extract::CookieJar;
use deployment_restarter_cluster::DeploymentSummary;
use deployment_restarter_platform_access::TOKEN_COOKIE;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Serves the console shell, or a login link when no session cookie is set.
pub async fn home(jar: CookieJar) -> Html<String> {
    let logged_in = jar.get(TOKEN_COOKIE).is_some();
    Html(home_page(logged_in))
}

fn home_page(logged_in: bool) -> String {
    let body = if logged_in {
        r#"<nav><a href="/logout">Log out</a></nav>
    <h1>Deployments</h1>
    <div id="namespaces" hx-get="/api/namespaces" hx-trigger="load"></div>
    <div id="deployments"></div>"#
    } else {
        r#"<h1>Deployment restarter</h1>
    <p><a href="/login">Log in</a></p>"#
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1"/>
    <title>Deployment restarter</title>
    <link rel="stylesheet" href="/static/style.css"/>
    <script src="{HTMX_SRC}"></script>
</head>
<body>
    {body}
</body>
</html>
"#
    )
}

/// Renders the namespace picker.
#[must_use]
pub fn namespace_list(namespaces: &[String]) -> Html<String> {
    if namespaces.is_empty() {
        return Html("<p>No namespaces available.</p>".to_string());
    }

    let mut html = String::from("<ul class=\"namespaces\">");
    for namespace in namespaces {
        html.push_str(&format!(
            r##"<li><a href="#" hx-get="/api/namespaces/{namespace}" hx-target="#deployments" hx-swap="innerHTML">{namespace}</a></li>"##
        ));
    }
    html.push_str("</ul>");
    Html(html)
}

/// Renders the deployments of one namespace with a restart button each.
#[must_use]
pub fn deployment_list(namespace: &str, deployments: &[DeploymentSummary]) -> Html<String> {
    let mut html = format!("<h2>{namespace}</h2>");
    if deployments.is_empty() {
        html.push_str("<p>No deployments.</p>");
        return Html(html);
    }

    html.push_str("<ul class=\"deployments\">");
    for deployment in deployments {
        html.push_str(&format!(
            r##"<li>{name} - {ready}/{desired} ready <button hx-post="/api/namespaces/{namespace}/deployments/{name}/restart" hx-target="#deployments" hx-swap="innerHTML" hx-confirm="Restart {name}?">Restart</button></li>"##,
            name = deployment.name,
            ready = deployment.ready_replicas,
            desired = deployment.desired_replicas,
        ));
    }
    html.push_str("</ul>");
    Html(html)
}
