//! Input resolution: turns a caller's `PredictRequest` into something the
//! OCR engine can read.
//!
//! A request names a source type (`path`, `url`, `base64`, `file`) and carries
//! the matching payload field. Resolution validates the pair, fetches or
//! decodes the image where needed, and fails with a validation error for
//! anything the caller got wrong.

mod fetcher;
mod request;
mod resolver;

pub use fetcher::RemoteFetcher;
pub use request::{PredictRequest, SourceType, UploadedFile};
pub(crate) use resolver::required_file;
pub use resolver::{has_image_extension, parse_image_url, resolve, ResolvedImage};

pub const UNSUPPORTED_TYPE_MESSAGE: &str = "type 字段只支持 path、url、base64、file";
pub const UNSUPPORTED_IMAGE_MESSAGE: &str = "请上传 .jpg 或 .png 格式图片";

pub(crate) fn missing_field(field: &str) -> String {
    format!("缺少必填字段: {field}")
}
