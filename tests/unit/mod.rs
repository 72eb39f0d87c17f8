/// Unit tests of the public building blocks
mod rendering_tests;
mod session_tests;
