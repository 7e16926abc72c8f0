//! HTML fragments for the public pages.
//!
//! Every record field passes through [`escape_html`] before it reaches the
//! markup; asset paths are built from [`AssetsConfig`].

use crate::query::Highlights;
use crate::state::{DetailView, ListingState, SearchState, SearchView};
use reqwest::Url;
use shopdir_config::AssetsConfig;
use shopdir_protocol::{Category, ShopRecord};
use std::fmt::Write;

const MENU_IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Builds card, detail, and page markup.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    assets: AssetsConfig,
}

impl Renderer {
    pub fn new(assets: AssetsConfig) -> Self {
        Self { assets }
    }

    /// Link to a record's detail page with the id percent-encoded.
    pub fn detail_href(&self, id: &str) -> String {
        let query = Url::parse_with_params("http://localhost/", &[("id", id)])
            .ok()
            .and_then(|url| url.query().map(str::to_string))
            .unwrap_or_default();
        format!("{}?{query}", self.assets.detail_page)
    }

    /// Display path of one stored image.
    ///
    /// The extension is always rewritten to `.jpg`, whatever was stored.
    /// Uploads named `.png` or `.webp` therefore resolve to a file that may
    /// not exist; left as-is until the asset pipeline settles on a format.
    pub fn image_src(&self, record: &ShopRecord, file: &str) -> String {
        format!(
            "{}/{}/{}.jpg",
            self.assets.image_root.trim_end_matches('/'),
            record.id_suffix(),
            strip_extension(file)
        )
    }

    pub fn menu_src(&self, menu: &str) -> String {
        format!("{}/{menu}", self.assets.menu_root.trim_end_matches('/'))
    }

    /// Summary card used by every listing.
    pub fn card(&self, record: &ShopRecord) -> String {
        let mut html = String::from("<div class=\"card\"><div>");
        let _ = write!(
            html,
            "<div class=\"card-title\">{}</div><div class=\"card-type\">{}{}</div>",
            escape_html(&record.name),
            badge(&record.category),
            escape_html(&record.shop_type)
        );
        if !record.description.is_empty() {
            let _ = write!(
                html,
                "<div class=\"card-desc\">{}</div>",
                escape_html(&record.description)
            );
        }
        let tags = record.tag_list();
        if !tags.is_empty() {
            let _ = write!(
                html,
                "<div class=\"card-tags\">Tags: {}</div>",
                escape_html(&tags.join(" / "))
            );
        }
        if !record.open_time.is_empty() {
            let _ = write!(
                html,
                "<div class=\"card-meta\">Hours: {}</div>",
                escape_html(&record.open_time)
            );
        }
        let _ = write!(
            html,
            "</div><a class=\"detail-link\" href=\"{}\">View details &rarr;</a></div>",
            escape_html(&self.detail_href(&record.id))
        );
        html
    }

    /// Cards for a set of records, or a message when there are none.
    pub fn cards(&self, records: &[ShopRecord], empty_message: &str) -> String {
        if records.is_empty() {
            return format!("<p>{}</p>", escape_html(empty_message));
        }
        records.iter().map(|record| self.card(record)).collect()
    }

    pub fn detail(&self, view: &DetailView) -> String {
        let record = match view {
            DetailView::MissingId => return "<p>Invalid shop id.</p>".to_string(),
            DetailView::NotFound(_) => return "<p>Shop not found.</p>".to_string(),
            DetailView::Found(record) => record,
        };

        let mut html = String::from("<div class=\"detail-wrapper\">");
        let _ = write!(
            html,
            "<div class=\"detail-name\">{}</div><div class=\"detail-type\">{}{}</div>",
            escape_html(&record.name),
            badge(&record.category),
            escape_html(&record.shop_type)
        );
        detail_row(&mut html, "About", &record.description);
        detail_row(&mut html, "Address", &record.address);
        detail_row(&mut html, "Hours", &record.open_time);
        detail_row(&mut html, "Services", &record.services);

        let contact = &record.contact;
        if !contact.is_empty() {
            let mut parts = Vec::new();
            if !contact.wechat.is_empty() {
                parts.push(format!("WeChat: {}", escape_html(&contact.wechat)));
            }
            if !contact.phone.is_empty() {
                parts.push(format!("Phone: {}", escape_html(&contact.phone)));
            }
            let _ = write!(
                html,
                "<div class=\"detail-row\"><span class=\"detail-label\">Contact:</span>{}</div>",
                parts.join(" ")
            );
        }
        detail_row(&mut html, "Tags", &record.tag_list().join(" / "));

        if !record.images.is_empty() {
            html.push_str(
                "<div class=\"detail-row\"><span class=\"detail-label\">Photos:</span></div>\
                 <div class=\"detail-row detail-images\">",
            );
            for file in &record.images {
                let _ = write!(
                    html,
                    "<img src=\"{}\" alt=\"{}\">",
                    escape_html(&self.image_src(record, file)),
                    escape_html(&record.name)
                );
            }
            html.push_str("</div>");
        }

        if !record.menu.is_empty() {
            let src = escape_html(&self.menu_src(&record.menu));
            if is_image_file(&record.menu) {
                let _ = write!(
                    html,
                    "<div class=\"detail-row\"><span class=\"detail-label\">Menu:</span></div>\
                     <div class=\"detail-row\"><img src=\"{src}\" alt=\"{} menu\"></div>",
                    escape_html(&record.name)
                );
            } else {
                let _ = write!(
                    html,
                    "<div class=\"detail-row\"><span class=\"detail-label\">Menu:</span>\
                     <a href=\"{src}\" target=\"_blank\">View menu</a></div>"
                );
            }
        }

        if !record.last_update.is_empty() {
            let _ = write!(
                html,
                "<div class=\"detail-row detail-updated\">Last updated: {}</div>",
                escape_html(&record.last_update)
            );
        }
        html.push_str("</div>");
        html
    }

    /// Home page sections, one per selectable category.
    pub fn home(&self, highlights: &Highlights) -> String {
        let sections = [
            ("food-list-home", "Food", &highlights.food, "No food listings yet."),
            (
                "ent-list-home",
                "Entertainment",
                &highlights.entertainment,
                "No entertainment listings yet.",
            ),
            (
                "service-list-home",
                "Services",
                &highlights.service,
                "No service listings yet.",
            ),
        ];
        let mut html = String::new();
        for (id, title, records, empty) in sections {
            let _ = write!(
                html,
                "<section><h2>{title}</h2><div id=\"{id}\" class=\"card-list\">{}</div></section>",
                self.cards(records, empty)
            );
        }
        html
    }

    /// A category page with its filter box.
    pub fn listing(&self, state: &ListingState) -> String {
        format!(
            "<h1>{}</h1>{}<div id=\"category-list\" class=\"card-list\">{}</div>",
            escape_html(category_title(&state.category)),
            search_form(&format!("{}.html", state.category.as_str()), &state.query),
            self.cards(&state.results, "No results match your filter.")
        )
    }

    pub fn search(&self, state: &SearchState) -> String {
        let results = match &state.view {
            SearchView::Prompt => "<p>Enter a keyword to start searching.</p>".to_string(),
            SearchView::Results(records) => {
                self.cards(records, "No matches found. Try a different keyword.")
            }
        };
        format!(
            "<h1>Search</h1>{}<div id=\"search-results\" class=\"card-list\">{results}</div>",
            search_form("search.html", &state.query)
        )
    }

    /// Wrap a body fragment in the site layout.
    pub fn page(&self, title: &str, body: &str) -> String {
        format!(
            "<!doctype html><html><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             <title>{}</title></head><body>\
             <nav><a href=\"index.html\">Home</a> <a href=\"food.html\">Food</a> \
             <a href=\"entertainment.html\">Entertainment</a> \
             <a href=\"service.html\">Services</a> <a href=\"search.html\">Search</a></nav>\
             <main>{body}</main></body></html>",
            escape_html(title)
        )
    }
}

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Page heading for a category selector.
pub fn category_title(category: &Category) -> &str {
    match category {
        Category::Food => "Food",
        Category::Entertainment => "Entertainment",
        Category::Service => "Services",
        Category::Other(name) => name,
    }
}

fn badge(category: &Category) -> String {
    if category.is_empty() {
        String::new()
    } else {
        format!("<span class=\"badge\">{}</span> ", escape_html(category.as_str()))
    }
}

fn detail_row(html: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let _ = write!(
        html,
        "<div class=\"detail-row\"><span class=\"detail-label\">{label}:</span>{}</div>",
        escape_html(value)
    );
}

fn search_form(action: &str, query: &str) -> String {
    format!(
        "<form action=\"{action}\" method=\"get\"><input id=\"search-input\" type=\"search\" \
         name=\"q\" value=\"{}\"><button id=\"search-btn\" type=\"submit\">Search</button></form>",
        escape_html(query)
    )
}

/// Drop a trailing `.ext` from the last path segment, if any.
fn strip_extension(file: &str) -> &str {
    match file.rfind('.') {
        Some(dot) if dot + 1 < file.len() && !file[dot + 1..].contains('/') => &file[..dot],
        _ => file,
    }
}

fn is_image_file(name: &str) -> bool {
    MENU_IMAGE_EXTENSIONS
        .iter()
        .any(|extension| name.ends_with(extension))
}
