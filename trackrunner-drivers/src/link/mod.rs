//! Encoder link drivers

pub mod i2c_encoder;

pub use i2c_encoder::I2cEncoderLink;
