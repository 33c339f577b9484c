pub mod unit_dto;
