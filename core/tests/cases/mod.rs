mod configuration;
mod theory;
