//! Development server.
//!
//! A lightweight HTTP server over the build output directory, built on
//! `tiny_http`:
//!
//! - Static file serving with content-type detection
//! - Automatic `index.html` resolution for directories
//! - Filtered listings: `/{collection}/?tags=%23a,%23b` folds the labels
//!   into a tag selection and renders the listing on the fly
//! - 404 for anything unresolved, including unpublished or missing slugs
//! - Graceful shutdown on Ctrl+C

use crate::{
    config::SiteConfig,
    content::Collection,
    generator::page,
    log,
    tags::{FilteredView, TagSelection},
};
use anyhow::{Context, Result};
use std::{
    fs,
    io::Cursor,
    net::SocketAddr,
    path::Path,
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Start the development server. Blocks until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface: std::net::IpAddr = config.serve.interface.parse()?;
    let base_port = config.serve.port;

    let (server, addr) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{addr}");

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => {
                continue;
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

/// Handle a single HTTP request.
///
/// Resolution order:
/// 1. Listing route with a `tags` query → render filtered listing
/// 2. Exact file match → serve file
/// 3. Directory with index.html → serve index.html
/// 4. Nothing found → 404
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    let serve_root = &config.build.output;

    // Split on '?' before decoding, so an encoded '?' in the path or an
    // encoded '&'/',' inside a tag label survives intact
    let (url_path, query) = split_request_url(request.url());
    let request_path = url_path.trim_matches('/');

    // A `tags` query on a listing route renders a filtered listing
    if let Some(labels) = query.and_then(parse_tags_query)
        && config.build.collections.iter().any(|c| c == request_path)
    {
        return serve_filtered_listing(request, config, request_path, &labels);
    }

    let local_path = serve_root.join(request_path);

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
    }

    // 404 Not Found: unknown routes and unpublished slugs alike
    serve_not_found(request)
}

/// Split a raw request URL into the decoded path and the raw (still
/// encoded) query string.
fn split_request_url(url: &str) -> (String, Option<&str>) {
    let (raw_path, query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    };
    let path = urlencoding::decode(raw_path)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();
    (path, query)
}

/// Extract the tag labels from a raw query string, e.g.
/// `tags=%23a,%23b` → `["#a", "#b"]`. Parameters and labels are split
/// before decoding, then each label is decoded on its own. Empty values
/// yield no labels.
fn parse_tags_query(query: &str) -> Option<Vec<String>> {
    let value = query
        .split('&')
        .find_map(|param| param.strip_prefix("tags="))?;
    if value.is_empty() {
        return Some(Vec::new());
    }
    Some(
        value
            .split(',')
            .map(|label| {
                urlencoding::decode(label)
                    .map(std::borrow::Cow::into_owned)
                    .unwrap_or_else(|_| label.to_string())
            })
            .collect(),
    )
}

/// Load the collection fresh and render a listing filtered through the
/// selection built by toggling each label in turn.
fn serve_filtered_listing(
    request: Request,
    config: &SiteConfig,
    collection_name: &str,
    labels: &[String],
) -> Result<()> {
    let collection = Collection::load(collection_name, &config.collection_dir(collection_name))?;
    let selection = TagSelection::from_labels(labels);
    let view = FilteredView::build(&collection, selection);

    serve_html(request, page::render_listing(config, collection_name, &view))
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve HTML content.
fn serve_html(request: Request, content: String) -> Result<()> {
    let response = Response::from_string(content)
        .with_header(Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap());
    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        // Documents
        Some("txt") => "text/plain; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",

        // Default binary
        _ => "application/octet-stream",
    }
}
