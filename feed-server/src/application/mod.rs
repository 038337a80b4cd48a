pub(crate) mod feed_service;
