use crate::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Symbolic errno names an error definition may map onto.
pub const POSIX_ERRNO_NAMES: &[&str] = &[
    "E2BIG", "EACCES", "EADDRINUSE", "EADDRNOTAVAIL", "EAFNOSUPPORT", "EAGAIN", "EALREADY",
    "EBADF", "EBADMSG", "EBUSY", "ECANCELED", "ECHILD", "ECONNABORTED", "ECONNREFUSED",
    "ECONNRESET", "EDEADLK", "EDESTADDRREQ", "EDOM", "EDQUOT", "EEXIST", "EFAULT", "EFBIG",
    "EHOSTUNREACH", "EIDRM", "EILSEQ", "EINPROGRESS", "EINTR", "EINVAL", "EIO", "EISCONN",
    "EISDIR", "ELOOP", "EMFILE", "EMLINK", "EMSGSIZE", "EMULTIHOP", "ENAMETOOLONG", "ENETDOWN",
    "ENETRESET", "ENETUNREACH", "ENFILE", "ENOBUFS", "ENODATA", "ENODEV", "ENOENT", "ENOEXEC",
    "ENOLCK", "ENOLINK", "ENOMEM", "ENOMSG", "ENOPROTOOPT", "ENOSPC", "ENOSR", "ENOSTR",
    "ENOSYS", "ENOTCONN", "ENOTDIR", "ENOTEMPTY", "ENOTRECOVERABLE", "ENOTSOCK", "ENOTSUP",
    "ENOTTY", "ENXIO", "EOPNOTSUPP", "EOVERFLOW", "EOWNERDEAD", "EPERM", "EPIPE", "EPROTO",
    "EPROTONOSUPPORT", "EPROTOTYPE", "ERANGE", "EROFS", "ESPIPE", "ESRCH", "ESTALE", "ETIME",
    "ETIMEDOUT", "ETXTBSY", "EWOULDBLOCK", "EXDEV",
];

/// A validated POSIX errno name such as `ENOENT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Errno(String);

impl Errno {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Errno {
    type Error = DefinitionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if POSIX_ERRNO_NAMES.contains(&value.as_str()) {
            Ok(Self(value))
        } else {
            Err(DefinitionError::InvalidErrno { errno: value })
        }
    }
}

impl FromStr for Errno {
    type Err = DefinitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value.to_string())
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_errno() {
        let errno: Errno = "ENOENT".parse().unwrap();
        assert_eq!(errno.as_str(), "ENOENT");
    }

    #[test]
    fn test_unknown_errno() {
        let result = "ENOTANERRNO".parse::<Errno>();
        assert!(matches!(
            result,
            Err(DefinitionError::InvalidErrno { ref errno }) if errno == "ENOTANERRNO"
        ));
    }

    #[test]
    fn test_errno_is_case_sensitive() {
        assert!("enoent".parse::<Errno>().is_err());
    }
}
