pub mod crawler;
pub mod province_codes;
