mod params;
mod request_builder;
