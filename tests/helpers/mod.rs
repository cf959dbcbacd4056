pub mod test_data_builder;
