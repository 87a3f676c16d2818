//! Grayscale graphics for a 5x7 LED matrix driven one column at a time.
//!
//! [`display::MatrixDisplay`] owns a [`framebuffer::Framebuffer`] and a
//! [`matrix::ColumnDriver`]. Application code draws into the framebuffer whenever it likes,
//! and a fixed-rate timer calls [`display::MatrixDisplay::tick`], which lights a single column
//! for one of 128 grayscale phases. Pixel brightness comes from the fraction of phases a
//! pixel stays on.
#![cfg_attr(not(test), no_std)]

pub mod animation;
pub mod animation_rain;
pub mod animation_ripple;
pub mod animation_sweep;
pub mod display;
pub mod framebuffer;
pub mod geometry;
pub mod graphics;
pub mod matrix;
pub mod refresh;
