pub mod tramite_dto;
pub mod usuario_dto;
