//! Album management and file deletion for Catbox.

use crate::client::{error_for_status, response_text, CatboxClient};
use crate::error::Result;
use reqwest::multipart::Form;
use std::time::Duration;
use tracing::info;

impl CatboxClient {
    /// Create an album from previously uploaded files.
    ///
    /// `files` may be full file URLs or bare shortcodes.
    ///
    /// # Returns
    /// Shortcode of the new album.
    pub async fn create_album<S: AsRef<str>>(
        &self,
        files: &[S],
        title: &str,
        description: Option<&str>,
    ) -> Result<String> {
        let userhash = self.require_userhash()?.to_string();
        let timeout = self.config().timeout;

        let form = Form::new()
            .text("reqtype", "createalbum")
            .text("userhash", userhash)
            .text("title", title.to_string())
            .text("desc", description.unwrap_or_default().to_string())
            .text("files", self.join_shortcodes(files));

        let response = error_for_status(self.post_form(form, timeout).await?).await?;
        let body = response_text(response, timeout).await?;
        let shortcode = self.shortcode_from_url(&body).to_string();

        info!(album = %shortcode, title = %title, files = files.len(), "Album created");
        Ok(shortcode)
    }

    /// Replace the title, description and files of an existing album.
    pub async fn edit_album<S: AsRef<str>>(
        &self,
        shortcode: &str,
        files: &[S],
        title: &str,
        description: Option<&str>,
    ) -> Result<()> {
        let userhash = self.require_userhash()?.to_string();
        let timeout = self.config().timeout;

        let form = Form::new()
            .text("reqtype", "editalbum")
            .text("userhash", userhash)
            .text("short", shortcode.to_string())
            .text("title", title.to_string())
            .text("desc", description.unwrap_or_default().to_string())
            .text("files", self.join_shortcodes(files));

        error_for_status(self.post_form(form, timeout).await?).await?;

        info!(album = %shortcode, files = files.len(), "Album edited");
        Ok(())
    }

    /// Delete an album. The files in it are kept.
    pub async fn delete_album(&self, shortcode: &str) -> Result<()> {
        let userhash = self.require_userhash()?.to_string();
        let timeout = self.config().timeout;

        let form = Form::new()
            .text("reqtype", "deletealbum")
            .text("userhash", userhash)
            .text("short", shortcode.to_string());

        error_for_status(self.post_form(form, timeout).await?).await?;

        info!(album = %shortcode, "Album deleted");
        Ok(())
    }

    /// Delete uploaded files in a single request.
    pub async fn delete_files<S: AsRef<str>>(
        &self,
        files: &[S],
        timeout: Option<Duration>,
    ) -> Result<()> {
        let userhash = self.require_userhash()?.to_string();
        let timeout = self.timeout_or_default(timeout);
        let joined = self.join_shortcodes(files);

        let form = Form::new()
            .text("reqtype", "deletefiles")
            .text("userhash", userhash)
            .text("files", joined.clone());

        error_for_status(self.post_form(form, timeout).await?).await?;

        info!(files = %joined, "Deleted files");
        Ok(())
    }

    fn join_shortcodes<S: AsRef<str>>(&self, files: &[S]) -> String {
        files
            .iter()
            .map(|f| self.shortcode_from_url(f.as_ref()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
