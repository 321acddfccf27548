//! Browser render strategy
//!
//! Last rung of the cascade: launch a headless Chromium, render the page
//! with scripts enabled, and extract from the final DOM. Expensive, so it
//! only runs when enabled and every cheaper strategy has failed.

use crate::article::ArticleContent;
use crate::extract::extract_article;
use crate::fetch::{FetcherConfig, Outcome};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, warn};

/// Render the page in a headless browser and extract from the result.
pub(crate) async fn browser_render(config: &FetcherConfig, url: &str, floor: usize) -> Outcome {
    let html = match render_page(config, url).await {
        Ok(html) => html,
        Err(detail) => return Outcome::Error(detail),
    };

    let extraction = extract_article(&html);
    let chars = extraction.body.chars().count();
    if chars >= floor {
        Outcome::Success(ArticleContent {
            source_url: url.to_string(),
            title: extraction.title,
            body: extraction.body,
            truncated: false,
            method: None,
        })
    } else {
        Outcome::Empty(format!("rendered body below floor ({chars} chars)"))
    }
}

async fn render_page(config: &FetcherConfig, url: &str) -> Result<String, String> {
    let mut builder = BrowserConfig::builder()
        .viewport(chromiumoxide::handler::viewport::Viewport {
            width: 1920,
            height: 1080,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: true,
            has_touch: false,
        })
        .arg("--no-sandbox")
        .arg("--disable-blink-features=AutomationControlled");

    if let Some(ref path) = config.chrome_path {
        builder = builder.chrome_executable(path);
    }

    let cdp_config = builder
        .build()
        .map_err(|e| format!("browser config: {e}"))?;

    let (mut browser, mut handler) = Browser::launch(cdp_config)
        .await
        .map_err(|e| format!("browser launch: {e}"))?;

    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                warn!("browser handler event error");
                break;
            }
        }
    });

    let result = render_on(&browser, url).await;

    if let Err(e) = browser.close().await {
        warn!(error = %e, "browser close failed");
    }
    let _ = tokio::time::timeout(Duration::from_secs(5), handler_task).await;

    result
}

async fn render_on(browser: &Browser, url: &str) -> Result<String, String> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| format!("page creation: {e}"))?;

    apply_stealth(&page).await;

    page.goto(url).await.map_err(|e| format!("navigation: {e}"))?;
    page.wait_for_navigation()
        .await
        .map_err(|e| format!("navigation wait: {e}"))?;

    let html = page.content().await.map_err(|e| format!("content: {e}"))?;
    debug!(%url, bytes = html.len(), "page rendered");
    Ok(html)
}

/// Hide the most common automation tells before any page script runs.
/// Best effort; a failed injection is not fatal to the render.
async fn apply_stealth(page: &Page) {
    const SCRIPTS: &[&str] = &[
        r#"
            Object.defineProperty(navigator, 'webdriver', {
                get: () => undefined,
                configurable: true
            });
        "#,
        r#"
            Object.defineProperty(navigator, 'languages', {
                get: () => ['en-US', 'en'],
                configurable: true
            });
        "#,
        r#"
            if (!window.chrome) {
                window.chrome = { runtime: {} };
            }
        "#,
    ];

    for script in SCRIPTS {
        let params = AddScriptToEvaluateOnNewDocumentParams::builder()
            .source(*script)
            .build();
        match params {
            Ok(params) => {
                if let Err(e) = page.execute(params).await {
                    debug!(error = %e, "stealth script injection failed");
                }
            }
            Err(e) => debug!(error = %e, "stealth script build failed"),
        }
    }
}
