pub mod eso;
