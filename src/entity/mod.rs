//! Entity module - SeaORM 엔티티 정의
//!
//! 그룹과 그룹이 참조하는 사용자 / 공지 / 채팅방 / 멤버 테이블

pub mod enums;
pub mod group;
pub mod group_chat_room;
pub mod group_member;
pub mod notice;
pub mod user;
