//! Minimal W3C WebDriver client driving a Chromium session through a running
//! chromedriver.
//!
//! Only the handful of commands the defense scrape needs are implemented:
//! new session, navigate, find element, execute script, delete session.

use crate::cli::types::DefensePosition;
use crate::config::BrowserConfig;
use crate::defense::table::{count_rows, parse_table_html, DefenseTable, TableRow};
use crate::error::{IngestError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

/// Key under which W3C WebDriver returns element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

const POLL_INTERVAL: Duration = Duration::from_millis(250);

const TABLE_HTML_SCRIPT: &str =
    "const t = document.querySelector('table'); return t ? t.outerHTML : null;";

/// Browser flags for a stable, CI-friendly session.
pub fn chrome_args(headless: bool) -> Vec<&'static str> {
    let mut args = Vec::new();
    if headless {
        args.push("--headless=new");
    }
    args.extend([
        "--incognito",
        "--disable-blink-features=AutomationControlled",
        "--window-size=1920,1080",
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-notifications",
        "--lang=en-US",
    ]);
    args
}

/// New-session payload for chromedriver.
pub fn session_capabilities(config: &BrowserConfig) -> Value {
    let mut chrome_options = json!({ "args": chrome_args(config.headless) });
    if let Some(binary) = &config.chrome_binary {
        chrome_options["binary"] = json!(binary);
    }
    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "chrome",
                "goog:chromeOptions": chrome_options
            }
        }
    })
}

/// XPath of the tab button for a position.
pub fn tab_xpath(position: DefensePosition) -> String {
    format!("//button[contains(., '{}')]", position.label())
}

/// An open browser session. Must be closed with [`WebDriverSession::quit`].
pub struct WebDriverSession {
    client: Client,
    base_url: String,
    session_id: String,
    wait_timeout: Duration,
    /// Table markup returned by the previous read; a new tab must replace it.
    last_table: Option<String>,
}

impl WebDriverSession {
    pub async fn start(config: &BrowserConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.command_timeout)
            .build()?;
        let base_url = config.webdriver_url.trim_end_matches('/').to_string();

        info!("Starting browser session at {} (headless={})", base_url, config.headless);
        let value = send(
            &client,
            Method::POST,
            &format!("{base_url}/session"),
            Some(session_capabilities(config)),
        )
        .await?;

        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| IngestError::WebDriver {
                message: "new session response had no sessionId".to_string(),
            })?
            .to_string();
        debug!("WebDriver session {}", session_id);

        Ok(Self {
            client,
            base_url,
            session_id,
            wait_timeout: config.wait_timeout,
            last_table: None,
        })
    }

    async fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}/session/{}{}", self.base_url, self.session_id, path);
        send(&self.client, method, &url, body).await
    }

    pub async fn navigate(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.command(Method::POST, "/url", Some(json!({ "url": url })))
            .await?;
        Ok(())
    }

    /// Find one element by XPath; `Ok(None)` when it is not (yet) present.
    async fn find_xpath(&self, xpath: &str) -> Result<Option<Value>> {
        let body = json!({ "using": "xpath", "value": xpath });
        match self.command(Method::POST, "/element", Some(body)).await {
            Ok(value) => Ok(Some(value)),
            Err(IngestError::WebDriver { message }) if message.starts_with("no such element") => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Poll for an element until `wait_timeout` elapses.
    pub async fn wait_for_xpath(&self, xpath: &str) -> Result<Value> {
        let deadline = Instant::now() + self.wait_timeout;
        loop {
            if let Some(element) = self.find_xpath(xpath).await? {
                return Ok(element);
            }
            if Instant::now() >= deadline {
                return Err(IngestError::WebDriver {
                    message: format!("timed out waiting for {xpath}"),
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        self.command(
            Method::POST,
            "/execute/sync",
            Some(json!({ "script": script, "args": args })),
        )
        .await
    }

    /// Navigate to the page and wait until the first position tab renders.
    pub async fn open(&self, url: &str) -> Result<()> {
        self.navigate(url).await?;
        self.wait_for_xpath(&tab_xpath(DefensePosition::PG)).await?;
        Ok(())
    }

    /// End the session. Errors are returned but the session is gone either way.
    pub async fn quit(self) -> Result<()> {
        info!("Closing browser session {}", self.session_id);
        self.command(Method::DELETE, "", None).await?;
        Ok(())
    }
}

#[async_trait]
impl DefenseTable for WebDriverSession {
    async fn activate_tab(&mut self, position: DefensePosition) -> Result<()> {
        let button = self.wait_for_xpath(&tab_xpath(position)).await?;
        let element_id = button
            .get(ELEMENT_KEY)
            .cloned()
            .ok_or_else(|| IngestError::WebDriver {
                message: format!("tab {position} returned no element reference"),
            })?;
        self.execute(
            "arguments[0].click();",
            vec![json!({ ELEMENT_KEY: element_id })],
        )
        .await?;
        Ok(())
    }

    async fn read_table(&mut self) -> Result<Vec<TableRow>> {
        let deadline = Instant::now() + self.wait_timeout;
        loop {
            let html = self.execute(TABLE_HTML_SCRIPT, Vec::new()).await?;
            if let Some(html) = html.as_str() {
                let stale = self.last_table.as_deref() == Some(html);
                if !stale && count_rows(html)? >= 2 {
                    let rows = parse_table_html(html)?;
                    self.last_table = Some(html.to_string());
                    return Ok(rows);
                }
            }
            if Instant::now() >= deadline {
                return Err(IngestError::WebDriver {
                    message: "timed out waiting for results table".to_string(),
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

/// Send one WebDriver command and unwrap its `value`.
async fn send(client: &Client, method: Method, url: &str, body: Option<Value>) -> Result<Value> {
    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    let response = request.send().await?;
    let status = response.status();
    let payload: Value = response.json().await?;
    let value = payload.get("value").cloned().unwrap_or(Value::Null);

    if status.is_success() {
        Ok(value)
    } else {
        let error = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        let message = value.get("message").and_then(Value::as_str).unwrap_or("");
        if error != "no such element" {
            warn!("WebDriver command failed ({}): {} {}", status, error, message);
        }
        Err(IngestError::WebDriver {
            message: format!("{error}: {message}"),
        })
    }
}
