//! Browser userscript that pins a chatbot iframe onto a customer's website.

use url::Url;

pub const URL_PLACEHOLDER: &str = "##URL##";
pub const SCRIPT_MIME_TYPE: &str = "text/javascript";

pub fn script_filename(customer: &str) -> String {
    format!("qchat-script-{customer}.user.js")
}

/// Query string the chatbot endpoint understands as "answer with your canonical URL".
pub fn redirect_lookup_url(chatbot_url: &str) -> String {
    format!("{chatbot_url}&redirectUrl=true")
}

/// Keeps origin, path and query; drops userinfo and fragment.
pub fn normalize_redirect_url(raw: &str) -> Result<String, url::ParseError> {
    let parsed = Url::parse(raw)?;
    let mut normalized = parsed.origin().ascii_serialization();
    normalized.push_str(parsed.path());
    if let Some(query) = parsed.query().filter(|query| !query.is_empty()) {
        normalized.push('?');
        normalized.push_str(query);
    }
    Ok(normalized)
}

pub fn website_hostname(website: &str) -> Option<String> {
    Url::parse(website.trim())
        .ok()
        .and_then(|url| url.host_str().map(ToOwned::to_owned))
}

/// A token is only usable as a link when it carries the `?id=` access parameter.
pub fn chatbot_link(token: &str) -> &str {
    if token.contains("?id=") {
        token
    } else {
        ""
    }
}

pub fn userscript_template(customer: &str, hostname: &str) -> String {
    format!(
        r#"// ==UserScript==
// @name         QChatBot Integration - {customer}
// @namespace    http://tampermonkey.net/
// @version      2024-02-14
// @description  Embed the Chatbot within any website!
// @author       You
// @match        https://{hostname}/*
// @icon         https://www.google.com/s2/favicons?sz=64&domain=undefined.localhost
// @grant        none
// ==/UserScript==

(function() {{
    'use strict';
    let iframe = document.createElement('iframe');
    iframe.src = '{placeholder}';
    iframe.style.position = 'fixed';
    iframe.style.bottom = '0';
    iframe.style.right = '0';
    iframe.style.width = '380px';
    iframe.style.height = '480px';
    iframe.style.border = 'none';
    iframe.style.zIndex = '99999';
    document.body.appendChild(iframe);
}})();
"#,
        placeholder = URL_PLACEHOLDER,
    )
}

/// Substitutes the first placeholder only.
pub fn render_userscript(customer: &str, hostname: &str, resolved_url: &str) -> String {
    userscript_template(customer, hostname).replacen(URL_PLACEHOLDER, resolved_url, 1)
}
