mod demo;
mod highlight;
mod keyboard;

pub use demo::DemoApp;
