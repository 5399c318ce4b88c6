pub mod tramite;
pub mod usuario;
