mod click_tests;
mod layout_testbed;
mod sizing_tests;
