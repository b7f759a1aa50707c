pub mod datos_gov;

pub use datos_gov::DatosGovProvider;
