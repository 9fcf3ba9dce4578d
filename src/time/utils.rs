use std::io;

pub(crate) fn timeout_err(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, msg)
}

pub(crate) fn cancelled_err(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::Interrupted, msg)
}
