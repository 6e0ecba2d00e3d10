//! Presigned-POST upload for dataset contents.

use crate::models::{PairError, Result};
use reqwest::multipart::{Form, Part};
use url::Url;

/// Extract the signed form fields from a presigned POST URL.
///
/// The storage service encodes them in the query string; they must be
/// replayed as form fields alongside the file part.
pub(crate) fn presigned_form_fields(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Upload file contents to a presigned POST URL.
pub async fn upload_to_presigned_post(
    client: &reqwest::Client,
    presigned_post: &str,
    filename: &str,
    contents: Vec<u8>,
) -> Result<()> {
    let url = Url::parse(presigned_post)
        .map_err(|e| PairError::InvalidInput(format!("Invalid presigned URL: {e}")))?;

    let mut form = Form::new();
    for (key, value) in presigned_form_fields(&url) {
        form = form.text(key, value);
    }
    form = form.part("file", Part::bytes(contents).file_name(filename.to_string()));

    let mut target = url;
    target.set_query(None);

    let response = client.post(target).multipart(form).send().await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(PairError::Upload {
            status: status.as_u16(),
            message,
        });
    }

    Ok(())
}
