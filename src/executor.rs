use super::{
    bridge::Bridge,
    buffer::Buffer,
    error::{Error, ErrorKind, Result},
    response::Response,
    upload::UploadSource,
};
use log::{debug, warn};
use url::Url;
use webhdfs_http::{Method, ResponseError as HttpResponseError, Transport, TransportHandle};

pub(crate) fn execute(
    transport: &dyn Transport,
    url: &str,
    mut buffer: Buffer,
    upload: Option<&mut (dyn UploadSource + '_)>,
    method: Method,
) -> Result<Response> {
    let mut handle = transport.open().map_err(failed_at(url))?;
    let upload = match upload {
        Some(upload) if method.allows_body() => Some(upload),
        Some(_) => {
            warn!("{} request cannot carry a body, upload source is ignored", method);
            None
        }
        None => None,
    };

    let result = transfer(handle.as_mut(), url, &mut buffer, upload, method);
    let status_code = handle.response_code().unwrap_or_else(|err| {
        warn!("failed to read response code: {}", err);
        0
    });
    match result {
        Ok(()) => Ok(Response::new(status_code, buffer)),
        Err(err) => Err(err.status_code(status_code)),
    }
}

fn transfer(
    handle: &mut dyn TransportHandle,
    url: &str,
    buffer: &mut Buffer,
    upload: Option<&mut (dyn UploadSource + '_)>,
    method: Method,
) -> Result<()> {
    handle.set_url(url).map_err(failed_at(url))?;
    handle.set_method(method).map_err(failed_at(url))?;
    handle
        .set_follow_redirection(upload.is_none())
        .map_err(failed_at(url))?;
    buffer.clear();

    debug!("{} {}", method, url);
    let upload = match upload {
        Some(upload) => upload,
        None => return handle.perform(&mut Bridge::receiving(buffer)).map_err(failed_at(url)),
    };

    handle.perform(&mut Bridge::receiving(buffer)).map_err(failed_at(url))?;
    let location = redirect_target(handle, url, buffer, method)?;

    debug!("{} {} redirected to {}", method, url, location);
    handle.set_url(&location).map_err(failed_at(&location))?;
    handle
        .set_headers(&[("Transfer-Encoding", "chunked")])
        .map_err(failed_at(&location))?;
    handle.set_upload(method).map_err(failed_at(&location))?;
    buffer.clear();
    handle
        .perform(&mut Bridge::uploading(buffer, upload))
        .map_err(failed_at(&location))
}

fn redirect_target(handle: &mut dyn TransportHandle, url: &str, buffer: &Buffer, method: Method) -> Result<String> {
    let reason = match handle.redirect_url().map_err(failed_at(url))? {
        Some(location) if Url::parse(&location).is_ok() => return Ok(location),
        Some(location) if !location.is_empty() => format!("invalid redirect target {:?}", location),
        _ => "no redirect target".to_owned(),
    };
    let status_code = handle.response_code().unwrap_or_default();
    warn!(
        "{} {} responded {} with {}, upload is not sent",
        method, url, status_code, reason
    );
    Err(Error::new_with_msg(
        ErrorKind::MissingRedirect,
        format!("{} request responded {} with {}", method, status_code, reason),
    )
    .url(url)
    .response_body_sample(buffer.as_bytes()))
}

fn failed_at(url: &str) -> impl FnOnce(HttpResponseError) -> Error + '_ {
    move |err| {
        warn!("webhdfs request failed: {} (url: {})", err, url);
        Error::from(err).url(url)
    }
}
