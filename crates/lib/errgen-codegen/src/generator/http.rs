use crate::prelude::*;
use errgen_definitions::definition::HttpCode;
use tracing::error;

const HTTP_CODE_MACROS: [(u16, &str); 14] = [
    (400, "?HTTP_400_BAD_REQUEST"),
    (401, "?HTTP_401_UNAUTHORIZED"),
    (403, "?HTTP_403_FORBIDDEN"),
    (404, "?HTTP_404_NOT_FOUND"),
    (405, "?HTTP_405_METHOD_NOT_ALLOWED"),
    (409, "?HTTP_409_CONFLICT"),
    (413, "?HTTP_413_PAYLOAD_TOO_LARGE"),
    (415, "?HTTP_415_UNSUPPORTED_MEDIA_TYPE"),
    (416, "?HTTP_416_RANGE_NOT_SATISFIABLE"),
    (426, "?HTTP_426_UPGRADE_REQUIRED"),
    (429, "?HTTP_429_TOO_MANY_REQUESTS"),
    (500, "?HTTP_500_INTERNAL_SERVER_ERROR"),
    (501, "?HTTP_501_NOT_IMPLEMENTED"),
    (503, "?HTTP_503_SERVICE_UNAVAILABLE"),
];

pub fn http_code_macro(code: u16) -> Option<&'static str> {
    HTTP_CODE_MACROS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, macro_name)| *macro_name)
}

/// The `to_http_code/1` callback. Raw codes are pasted verbatim.
pub fn to_http_code_callback(od_error: &OdError) -> CodeGeneratorResult<String> {
    match &od_error.http_code {
        HttpCode::Code(code) => {
            let macro_name = http_code_macro(*code).ok_or_else(|| {
                error!(error = %od_error.name, code, "HTTP code has no status macro");
                CodeGeneratorError::UnmappedHttpCode { code: *code }
            })?;

            Ok(format!(
                "-spec to_http_code(t()) -> {macro_name}.\nto_http_code(_) ->\n    {macro_name}."
            ))
        }
        HttpCode::Raw(raw) => Ok(raw.clone()),
    }
}
