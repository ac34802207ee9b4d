mod codec_tests;
mod service_tests;
mod sweeper_tests;
