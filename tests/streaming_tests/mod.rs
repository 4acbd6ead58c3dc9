mod ordering_test;
