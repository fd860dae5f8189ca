mod tileset_tests;
