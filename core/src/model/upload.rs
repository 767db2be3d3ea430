/// What the client told us about the uploaded file, as opposed to what the
/// probe found in it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadInfo {
    pub file_name: String,
    pub mime_type: String,
    pub file_size: u64,
}
