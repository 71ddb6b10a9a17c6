//! HTML page rendering for listings and entry shells.
//!
//! Markdown/MDX bodies are not converted here; entry pages carry the raw
//! body in a passthrough container for an external bundler to process.

use crate::config::SiteConfig;
use crate::content::ContentEntry;
use crate::tags::{FilteredView, ListState, TagSelection};
use std::borrow::Cow;

/// Render a collection listing: tag summary with counts, optional reset
/// control, year-grouped entry list.
pub fn render_listing(config: &SiteConfig, collection_name: &str, view: &FilteredView) -> String {
    let mut html = String::with_capacity(4096);

    page_open(
        &mut html,
        config,
        &format!("{} | {}", collection_name, config.base.title),
    );

    html.push_str(&format!("<h1>{}</h1>\n", html_escape(collection_name)));

    render_tag_summary(&mut html, collection_name, view);

    if view.state() != ListState::Unfiltered {
        html.push_str(&format!(
            "<p><a class=\"reset\" href=\"/{}/\">reset</a></p>\n",
            html_escape(collection_name)
        ));
    }

    html.push_str("<section class=\"entries\">\n");
    for group in view.groups() {
        let heading = match group.year {
            Some(year) => year.to_string(),
            None => "undated".to_string(),
        };
        html.push_str(&format!("<h2>{heading}</h2>\n<ul>\n"));
        for entry in &group.entries {
            render_listing_item(&mut html, collection_name, entry);
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");

    page_close(&mut html, config);
    html
}

/// Render one entry's page shell: header metadata plus the raw body.
pub fn render_entry(config: &SiteConfig, collection_name: &str, entry: &ContentEntry) -> String {
    let mut html = String::with_capacity(entry.body.len() + 2048);

    page_open(
        &mut html,
        config,
        &format!("{} | {}", entry.title, config.base.title),
    );

    html.push_str(&format!(
        "<nav><a href=\"/{}/\">&larr; {}</a></nav>\n",
        html_escape(collection_name),
        html_escape(collection_name)
    ));

    html.push_str("<article>\n<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&entry.title)));

    if let Some(date) = entry.date {
        html.push_str(&format!(
            "<time datetime=\"{}\">{}</time>\n",
            date.to_ymd(),
            date.to_full()
        ));
    }
    if let Some(update) = entry.last_update {
        html.push_str(&format!(
            "<p class=\"updated\">Last updated: <time datetime=\"{}\">{}</time></p>\n",
            update.to_ymd(),
            update.to_full()
        ));
    }
    if let Some(description) = &entry.description {
        html.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            html_escape(description)
        ));
    }

    let labels = entry.tag_labels();
    if !labels.is_empty() {
        html.push_str("<p class=\"tags\">");
        for (i, label) in labels.iter().enumerate() {
            if i > 0 {
                html.push(' ');
            }
            html.push_str(&format!(
                "<span class=\"tag\">{}</span>",
                html_escape(label)
            ));
        }
        html.push_str("</p>\n");
    }

    html.push_str("</header>\n");

    // Raw body: converted downstream by the bundler, not here.
    html.push_str("<div class=\"entry-body\" data-format=\"markdown\">\n");
    html.push_str(&html_escape(&entry.body));
    html.push_str("\n</div>\n</article>\n");

    page_close(&mut html, config);
    html
}

/// Serialize a selection into a listing URL with a `tags` query, e.g.
/// `/notes/?tags=%23rust,%23web`. An empty selection maps to the bare
/// listing route.
pub fn listing_url(collection_name: &str, selection: &TagSelection) -> String {
    if selection.is_empty() {
        return format!("/{collection_name}/");
    }
    let encoded: Vec<_> = selection
        .iter()
        .map(|label| urlencoding::encode(label).into_owned())
        .collect();
    format!("/{collection_name}/?tags={}", encoded.join(","))
}

fn render_tag_summary(html: &mut String, collection_name: &str, view: &FilteredView) {
    if view.index.is_empty() {
        return;
    }
    html.push_str("<nav class=\"tag-summary\">\n");
    for (label, count) in view.index.iter() {
        let toggled = view.selection.toggle(label);
        let class = if view.selection.contains(label) {
            "tag active"
        } else {
            "tag"
        };
        html.push_str(&format!(
            "<a class=\"{class}\" href=\"{}\">{} ({count})</a>\n",
            listing_url(collection_name, &toggled),
            html_escape(label),
        ));
    }
    html.push_str("</nav>\n");
}

fn render_listing_item(html: &mut String, collection_name: &str, entry: &ContentEntry) {
    html.push_str("<li>");
    if let Some(date) = entry.date {
        html.push_str(&format!(
            "<time datetime=\"{}\">{}</time> ",
            date.to_ymd(),
            date.to_preview()
        ));
    }
    html.push_str(&format!(
        "<a href=\"/{}/{}/\">{}</a>",
        html_escape(collection_name),
        html_escape(&entry.slug),
        html_escape(&entry.title)
    ));

    let labels = entry.tag_labels();
    if !labels.is_empty() {
        html.push_str(" <span class=\"tags\">");
        for (i, label) in labels.iter().enumerate() {
            if i > 0 {
                html.push(' ');
            }
            html.push_str(&html_escape(label));
        }
        html.push_str("</span>");
    }
    html.push_str("</li>\n");
}

fn page_open(html: &mut String, config: &SiteConfig, title: &str) {
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n",
        html_escape(&config.base.language)
    ));
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        html_escape(&config.base.description)
    ));
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("</head>\n<body>\n");
}

fn page_close(html: &mut String, config: &SiteConfig) {
    if !config.base.copyright.is_empty() {
        html.push_str(&format!(
            "<footer>{}</footer>\n",
            html_escape(&config.base.copyright)
        ));
    }
    html.push_str("</body>\n</html>\n");
}

/// Escape HTML special characters.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
fn html_escape(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['<', '>', '&', '"']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
