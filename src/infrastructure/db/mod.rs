pub mod test_assets;
