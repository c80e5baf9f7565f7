pub mod offender_list;
