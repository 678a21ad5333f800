//! CDP-backed driver (requires the `browser` feature).
//!
//! Drives a real Chromium instance through chromiumoxide. Selector queries
//! are rendered to JavaScript by [`Selector`] and evaluated in the page, so
//! every operation re-resolves its element against the live document.

use crate::browser::BrowserConfig;
use crate::driver::Driver;
use crate::locator::Selector;
use crate::result::{SuiteError, SuiteResult};
use crate::storage::{Cookie, OriginStorage, StorageState};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::Page as CdpPage;
use futures::StreamExt;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Quote a Rust string as a JavaScript string literal
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Real-browser driver over the Chrome DevTools Protocol
pub struct ChromiumDriver {
    browser: Mutex<CdpBrowser>,
    page: CdpPage,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl std::fmt::Debug for ChromiumDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromiumDriver").finish_non_exhaustive()
    }
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    pub async fn launch(config: &BrowserConfig) -> SuiteResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height)
            .no_sandbox();
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &config.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let cdp_config = builder.build().map_err(|e| SuiteError::Browser {
            message: e.to_string(),
        })?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config)
            .await
            .map_err(|e| SuiteError::Browser {
                message: e.to_string(),
            })?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SuiteError::Browser {
                message: e.to_string(),
            })?;

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handle,
        })
    }

    /// Close the browser process
    pub async fn close(self) -> SuiteResult<()> {
        let mut browser = self.browser.into_inner();
        browser.close().await.map_err(|e| SuiteError::Browser {
            message: e.to_string(),
        })?;
        Ok(())
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> SuiteResult<T> {
        debug!("EVAL: {expr}");
        let result = self
            .page
            .evaluate(expr)
            .await
            .map_err(|e| SuiteError::Browser {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| SuiteError::Browser {
            message: e.to_string(),
        })
    }

    /// Evaluate against the selected element; `body` sees it as `el`.
    /// A null query result maps to `ElementMissing`.
    async fn eval_on<T: serde::de::DeserializeOwned>(
        &self,
        selector: &Selector,
        body: &str,
    ) -> SuiteResult<T> {
        let expr = format!(
            "(() => {{ const el = {query}; if (!el) return null; return ({body}); }})()",
            query = selector.to_query(),
        );
        let value: Option<T> = self.eval(&expr).await?;
        value.ok_or_else(|| SuiteError::ElementMissing {
            selector: selector.to_string(),
        })
    }
}

#[async_trait]
impl Driver for ChromiumDriver {
    async fn goto(&self, url: &str) -> SuiteResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| SuiteError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> SuiteResult<String> {
        self.eval("window.location.href").await
    }

    async fn click(&self, selector: &Selector) -> SuiteResult<()> {
        self.eval_on::<bool>(selector, "(el.click(), true)").await?;
        Ok(())
    }

    async fn fill(&self, selector: &Selector, value: &str) -> SuiteResult<()> {
        let body = format!(
            "(el.value = {v}, \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})), \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})), true)",
            v = js_string(value),
        );
        self.eval_on::<bool>(selector, &body).await?;
        Ok(())
    }

    async fn input_value(&self, selector: &Selector) -> SuiteResult<String> {
        self.eval_on(selector, "el.value ?? ''").await
    }

    async fn text_content(&self, selector: &Selector) -> SuiteResult<Option<String>> {
        let expr = format!(
            "(() => {{ const el = {query}; return el ? (el.textContent ?? '') : null; }})()",
            query = selector.to_query(),
        );
        self.eval(&expr).await
    }

    async fn is_visible(&self, selector: &Selector) -> SuiteResult<bool> {
        let expr = format!(
            "(() => {{ const el = {query}; if (!el) return false; \
             const r = el.getBoundingClientRect(); \
             const style = window.getComputedStyle(el); \
             return r.width > 0 && r.height > 0 && \
                    style.visibility !== 'hidden' && style.display !== 'none'; }})()",
            query = selector.to_query(),
        );
        self.eval(&expr).await
    }

    async fn is_enabled(&self, selector: &Selector) -> SuiteResult<bool> {
        self.eval_on(selector, "!el.disabled").await
    }

    async fn validity_valid(&self, selector: &Selector) -> SuiteResult<bool> {
        self.eval_on(selector, "el.validity ? el.validity.valid : true")
            .await
    }

    async fn validation_message(&self, selector: &Selector) -> SuiteResult<String> {
        self.eval_on(selector, "el.validationMessage ?? ''").await
    }

    async fn option_values(&self, selector: &Selector) -> SuiteResult<Vec<String>> {
        self.eval_on(selector, "Array.from(el.options ?? []).map(o => o.value)")
            .await
    }

    async fn select_option(&self, selector: &Selector, value: &str) -> SuiteResult<()> {
        let body = format!(
            "(el.value = {v}, \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})), true)",
            v = js_string(value),
        );
        self.eval_on::<bool>(selector, &body).await?;
        Ok(())
    }

    async fn count(&self, selector: &Selector) -> SuiteResult<usize> {
        self.eval(&selector.to_count_query()).await
    }

    async fn test_ids_matching(&self, prefix: &str) -> SuiteResult<Vec<String>> {
        let expr = format!(
            "Array.from(document.querySelectorAll('[data-testid^=\"{prefix}\"]'))\
             .map(el => el.getAttribute('data-testid'))\
             .filter(id => /^\\d+$/.test(id.slice({len})))",
            len = prefix.len(),
        );
        self.eval(&expr).await
    }

    async fn attribute(&self, selector: &Selector, name: &str) -> SuiteResult<Option<String>> {
        let body = format!("el.getAttribute({n})", n = js_string(name));
        let expr = format!(
            "(() => {{ const el = {query}; return el ? {body} : null; }})()",
            query = selector.to_query(),
        );
        self.eval(&expr).await
    }

    async fn set_local_storage(&self, key: &str, value: &str) -> SuiteResult<()> {
        let expr = format!(
            "(window.localStorage.setItem({k}, {v}), true)",
            k = js_string(key),
            v = js_string(value),
        );
        self.eval::<bool>(&expr).await?;
        Ok(())
    }

    async fn local_storage(&self, key: &str) -> SuiteResult<Option<String>> {
        let expr = format!("window.localStorage.getItem({k})", k = js_string(key));
        self.eval(&expr).await
    }

    async fn storage_state(&self) -> SuiteResult<StorageState> {
        let cookies = self
            .page
            .get_cookies()
            .await
            .map_err(|e| SuiteError::Browser {
                message: e.to_string(),
            })?
            .into_iter()
            .map(|c| Cookie {
                name: c.name,
                value: c.value,
                domain: c.domain,
                path: c.path,
            })
            .collect();
        let origin: String = self.eval("window.location.origin").await?;
        let local_storage: HashMap<String, String> = self
            .eval("Object.fromEntries(Object.entries(window.localStorage))")
            .await?;
        Ok(StorageState {
            cookies,
            origins: vec![OriginStorage {
                origin,
                local_storage,
            }],
        })
    }

    async fn restore_storage_state(&self, snapshot: &StorageState) -> SuiteResult<()> {
        let params: Vec<CookieParam> = snapshot
            .cookies
            .iter()
            .filter_map(|c| {
                CookieParam::builder()
                    .name(&c.name)
                    .value(&c.value)
                    .domain(&c.domain)
                    .path(&c.path)
                    .build()
                    .ok()
            })
            .collect();
        if !params.is_empty() {
            self.page
                .set_cookies(params)
                .await
                .map_err(|e| SuiteError::Browser {
                    message: e.to_string(),
                })?;
        }
        for origin in &snapshot.origins {
            for (key, value) in &origin.local_storage {
                self.set_local_storage(key, value).await?;
            }
        }
        Ok(())
    }
}
