mod rotation_key_tests;
