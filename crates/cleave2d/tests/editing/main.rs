mod common;
mod multipart_session;
mod split_session;
