//! File upload operations for Catbox and Litterbox.

use crate::client::{response_text, CatboxClient};
use crate::error::{CatboxError, Result};
use crate::types::{BatchOptions, LitterboxDuration, UploadInput};
use futures_util::future::try_join_all;
use reqwest::multipart::{Form, Part};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

impl CatboxClient {
    /// Upload a file to permanent Catbox hosting.
    ///
    /// # Arguments
    /// * `input` - Path or byte buffer to upload
    /// * `file_name` - Name sent with the file; required for byte buffers
    /// * `timeout` - Request timeout, defaults to the configured one
    ///
    /// # Returns
    /// URL of the hosted file.
    pub async fn upload_file(
        &self,
        input: impl Into<UploadInput>,
        file_name: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let userhash = self.require_userhash()?.to_string();
        let input = input.into();
        let file_name = input.file_name(file_name)?;
        let timeout = self.timeout_or_default(timeout);

        let form = Form::new()
            .text("reqtype", "fileupload")
            .text("userhash", userhash)
            .part("fileToUpload", file_part(input, file_name).await?);

        let url = self.send_upload(form, timeout).await?;
        debug!(url = %url, "file link");
        Ok(url)
    }

    /// Upload a file to Litterbox temporary hosting.
    ///
    /// Needs no userhash. The file expires after `duration`.
    pub async fn upload_to_litterbox(
        &self,
        input: impl Into<UploadInput>,
        file_name: Option<&str>,
        duration: LitterboxDuration,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let input = input.into();
        let file_name = input.file_name(file_name)?;
        let timeout = self.timeout_or_default(timeout);

        let form = Form::new()
            .text("reqtype", "fileupload")
            .text("time", duration.as_str())
            .part("fileToUpload", file_part(input, file_name).await?);

        let url = self.send_upload(form, timeout).await?;
        debug!(url = %url, duration = %duration, "litterbox file link");
        Ok(url)
    }

    /// Upload several files to Catbox in chunks.
    ///
    /// Files within a chunk are uploaded concurrently; chunks run one after
    /// another with `options.delay` between them. The first failure aborts
    /// the whole batch.
    ///
    /// # Returns
    /// Hosted URLs in the same order as `paths`.
    pub async fn upload_album(
        &self,
        paths: &[PathBuf],
        options: &BatchOptions,
    ) -> Result<Vec<String>> {
        debug!(files = paths.len(), "Start upload album");
        let links = upload_in_chunks(paths, options, |path| {
            self.upload_file(path.as_path(), None, Some(options.timeout))
        })
        .await?;
        debug!("End upload album");
        Ok(links)
    }

    /// Upload several files to Litterbox in chunks.
    ///
    /// Same batching as [`CatboxClient::upload_album`].
    pub async fn upload_album_to_litterbox(
        &self,
        paths: &[PathBuf],
        duration: LitterboxDuration,
        options: &BatchOptions,
    ) -> Result<Vec<String>> {
        debug!(files = paths.len(), duration = %duration, "Start upload album to litterbox");
        let links = upload_in_chunks(paths, options, |path| {
            self.upload_to_litterbox(path.as_path(), None, duration, Some(options.timeout))
        })
        .await?;
        debug!("End upload album to litterbox");
        Ok(links)
    }

    async fn send_upload(&self, form: Form, timeout: Duration) -> Result<String> {
        let response = self.post_form(form, timeout).await?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(CatboxError::Service(format!(
                "Failed to upload file to Catbox (status {})",
                status.as_u16()
            )));
        }

        response_text(response, timeout).await
    }
}

async fn file_part(input: UploadInput, file_name: String) -> Result<Part> {
    let contents = input.into_bytes().await?;
    let size = contents.len();

    let part = Part::bytes(contents)
        .file_name(file_name.clone())
        .mime_str("application/octet-stream")
        .map_err(|e| CatboxError::Service(e.to_string()))?;

    debug!(file = %file_name, size, "Prepared upload");
    Ok(part)
}

/// Run `upload` over `paths` chunk by chunk, keeping input order.
async fn upload_in_chunks<'a, F, Fut>(
    paths: &'a [PathBuf],
    options: &BatchOptions,
    upload: F,
) -> Result<Vec<String>>
where
    F: Fn(&'a PathBuf) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    options.validate()?;

    let total_chunks = chunk_count(paths.len(), options.chunk_size);
    let mut links = Vec::with_capacity(paths.len());

    for (index, chunk) in paths.chunks(options.chunk_size).enumerate() {
        debug!(chunk = index + 1, total = total_chunks, "process chunk");

        // try_join_all yields results in submission order and drops the
        // remaining uploads on the first error
        links.extend(try_join_all(chunk.iter().map(&upload)).await?);

        if index + 1 < total_chunks {
            tokio::time::sleep(options.delay).await;
        }
    }

    info!(files = links.len(), chunks = total_chunks, "Album uploaded");
    Ok(links)
}

fn chunk_count(len: usize, chunk_size: usize) -> usize {
    len.div_ceil(chunk_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn paths(n: usize) -> Vec<PathBuf> {
        (0..n).map(|i| PathBuf::from(format!("file{}.png", i))).collect()
    }

    #[test]
    fn test_chunk_count() {
        assert_eq!(chunk_count(0, 3), 0);
        assert_eq!(chunk_count(3, 3), 1);
        assert_eq!(chunk_count(7, 3), 3);
        assert_eq!(chunk_count(50, 50), 1);
        assert_eq!(chunk_count(51, 50), 2);
    }

    #[tokio::test]
    async fn test_chunks_preserve_order() {
        let inputs = paths(7);
        let options = BatchOptions::new(Duration::from_secs(1), 3, Duration::ZERO);

        let links = upload_in_chunks(&inputs, &options, |path| async move {
            Ok::<_, CatboxError>(format!("https://files.catbox.moe/{}", path.display()))
        })
        .await
        .unwrap();

        assert_eq!(links.len(), 7);
        for (i, link) in links.iter().enumerate() {
            assert_eq!(link, &format!("https://files.catbox.moe/file{}.png", i));
        }
    }

    #[tokio::test]
    async fn test_chunks_run_sequentially() {
        let inputs = paths(5);
        let options = BatchOptions::new(Duration::from_secs(1), 2, Duration::ZERO);
        let in_flight = AtomicUsize::new(0);
        let peak = Mutex::new(0usize);

        upload_in_chunks(&inputs, &options, |path| {
            let in_flight = &in_flight;
            let peak = &peak;
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                {
                    let mut peak = peak.lock().unwrap();
                    *peak = (*peak).max(now);
                }
                tokio::task::yield_now().await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                Ok::<_, CatboxError>(path.display().to_string())
            }
        })
        .await
        .unwrap();

        assert!(*peak.lock().unwrap() <= 2);
    }

    #[tokio::test]
    async fn test_first_error_aborts_batch() {
        let inputs = paths(6);
        let options = BatchOptions::new(Duration::from_secs(1), 2, Duration::ZERO);
        let calls = AtomicUsize::new(0);

        let result = upload_in_chunks(&inputs, &options, |path| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if path.ends_with("file2.png") {
                    Err(CatboxError::Service("boom".to_string()))
                } else {
                    Ok(path.display().to_string())
                }
            }
        })
        .await;

        assert!(matches!(result, Err(CatboxError::Service(_))));
        // Third chunk never started
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_zero_chunk_size_rejected() {
        let inputs = paths(2);
        let options = BatchOptions::new(Duration::from_secs(1), 0, Duration::ZERO);

        let result = upload_in_chunks(&inputs, &options, |_| async {
            Ok::<_, CatboxError>(String::new())
        })
        .await;

        assert!(matches!(result, Err(CatboxError::Config(_))));
    }
}
