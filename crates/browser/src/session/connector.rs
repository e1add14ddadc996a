//! Connect/attach orchestration shared by every dependent command.
//!
//! Attach never spawns a browser: an absent handle is a hard error that
//! tells the caller to run browser-start. A present handle is resolved to
//! a live websocket endpoint by re-querying the discovery port (handles
//! can outlive their endpoint URL across browser restarts of the same
//! port), falling back to the stored endpoint before giving up.

use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;

use super::endpoint;
use super::handle::SessionHandle;
use super::repository::SessionRepository;
use crate::error::{BrowserError, Result};

/// A live attachment to the session browser.
pub struct BrowserConnection {
	browser: Browser,
	driver: JoinHandle<()>,
}

impl BrowserConnection {
	/// Loads the handle from `repo` and attaches to the process it names.
	pub async fn attach_via(repo: &SessionRepository) -> Result<Self> {
		let handle = repo.load()?.ok_or(BrowserError::NoSession)?;
		Self::attach(&handle).await
	}

	/// Attaches to the browser a handle describes.
	pub async fn attach(handle: &SessionHandle) -> Result<Self> {
		let ws_endpoint = match endpoint::fetch_version(&handle.port).await {
			Ok(info) => info.web_socket_debugger_url,
			Err(_) => handle.ws_endpoint.clone(),
		};

		let (browser, mut handler) =
			Browser::connect(ws_endpoint.clone()).await.map_err(|e| BrowserError::Attach {
				port: handle.port.clone(),
				reason: e.to_string(),
			})?;
		debug!(endpoint = %ws_endpoint, "attached to browser");

		// The handler stream must be polled for the connection to make progress.
		let driver = tokio::task::spawn(async move {
			while let Some(event) = handler.next().await {
				if event.is_err() {
					break;
				}
			}
		});

		Ok(Self { browser, driver })
	}

	/// Default execution target: the most-recently-opened page.
	pub async fn target_page(&self) -> Result<Page> {
		let mut pages = self.browser.pages().await?;
		pages.pop().ok_or(BrowserError::NoActivePage)
	}

	/// The most-recently-opened page, or a fresh blank one when none exist.
	pub async fn target_or_new_page(&self) -> Result<Page> {
		let mut pages = self.browser.pages().await?;
		match pages.pop() {
			Some(page) => Ok(page),
			None => self.new_page().await,
		}
	}

	/// Opens a new blank page.
	pub async fn new_page(&self) -> Result<Page> {
		Ok(self.browser.new_page("about:blank").await?)
	}

	/// Detaches from the browser without terminating it.
	pub async fn disconnect(self) {
		self.driver.abort();
		drop(self.browser);
	}
}
