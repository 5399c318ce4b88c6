pub mod tramite_service;
pub mod usuario_service;
