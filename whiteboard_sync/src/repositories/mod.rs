pub mod backend_http_repository;
