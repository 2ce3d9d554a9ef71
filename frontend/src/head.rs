//! Document head: title, description and the third-party tags.
//!
//! Everything here is best effort. A failure is logged and the page renders
//! regardless.

use log::{info, warn};
use web_sys::Document;

use crate::config;
use crate::error::PageError;

pub fn gtm_snippet(container_id: &str) -> String {
    format!(
        "(function(w,d,s,l,i){{w[l]=w[l]||[];w[l].push({{'gtm.start':\
new Date().getTime(),event:'gtm.js'}});var f=d.getElementsByTagName(s)[0],\
j=d.createElement(s),dl=l!='dataLayer'?'&l='+l:'';j.async=true;j.src=\
'https://www.googletagmanager.com/gtm.js?id='+i+dl;f.parentNode.insertBefore(j,f);\
}})(window,document,'script','dataLayer','{}');",
        container_id
    )
}

pub fn gtm_noscript(container_id: &str) -> String {
    format!(
        "<noscript><iframe src=\"https://www.googletagmanager.com/ns.html?id={}\" \
height=\"0\" width=\"0\" style=\"display:none;visibility:hidden\"></iframe></noscript>",
        container_id
    )
}

pub fn clarity_snippet(project_id: &str) -> String {
    format!(
        "(function(c,l,a,r,i,t,y){{\
c[a]=c[a]||function(){{(c[a].q=c[a].q||[]).push(arguments)}};\
t=l.createElement(r);t.async=1;t.src=\"https://www.clarity.ms/tag/\"+i;\
y=l.getElementsByTagName(r)[0];y.parentNode.insertBefore(t,y);\
}})(window, document, \"clarity\", \"script\", \"{}\");",
        project_id
    )
}

fn document() -> Result<Document, PageError> {
    web_sys::window()
        .ok_or(PageError::NoWindow)?
        .document()
        .ok_or(PageError::NoDocument)
}

fn set_metadata(document: &Document) -> Result<(), PageError> {
    document.set_title(config::PAGE_TITLE);
    let head = document.head().ok_or(PageError::NoHead)?;
    let meta = match document.query_selector("meta[name=\"description\"]")? {
        Some(existing) => existing,
        None => {
            let meta = document.create_element("meta")?;
            meta.set_attribute("name", "description")?;
            head.append_child(&meta)?;
            meta
        }
    };
    meta.set_attribute("content", config::PAGE_DESCRIPTION)?;
    Ok(())
}

/// Appends an inline script to `<head>` unless one with `id` is present.
fn inject_script(document: &Document, id: &str, source: &str) -> Result<bool, PageError> {
    if document.get_element_by_id(id).is_some() {
        return Ok(false);
    }
    let head = document.head().ok_or(PageError::NoHead)?;
    let script = document.create_element("script")?;
    script.set_id(id);
    script.set_text_content(Some(source));
    head.append_child(&script)?;
    Ok(true)
}

fn install_analytics(document: &Document) -> Result<(), PageError> {
    if inject_script(document, "gtm-head", &gtm_snippet(config::GTM_CONTAINER_ID))? {
        if let Some(body) = document.body() {
            body.insert_adjacent_html("afterbegin", &gtm_noscript(config::GTM_CONTAINER_ID))?;
        }
    }
    inject_script(document, "clarity", &clarity_snippet(config::CLARITY_PROJECT_ID))?;
    Ok(())
}

pub fn install() {
    let document = match document() {
        Ok(document) => document,
        Err(e) => {
            warn!("skipping head setup: {}", e);
            return;
        }
    };
    if let Err(e) = set_metadata(&document) {
        warn!("could not set page metadata: {}", e);
    }
    if config::analytics_enabled() {
        match install_analytics(&document) {
            Ok(()) => info!("analytics tags installed"),
            Err(e) => warn!("analytics tags not installed: {}", e),
        }
    }
}
