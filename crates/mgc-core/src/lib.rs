pub mod cancel;
pub mod color;
pub mod consts;
pub mod correction;
pub mod error;
pub mod frame;
pub mod io;
pub mod multiscale;
pub mod pipeline;
