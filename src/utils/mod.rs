pub mod jwt;
pub mod pkce;

#[cfg(test)]
pub mod test_app_state;
