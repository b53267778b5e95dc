mod payment_dto;

pub use payment_dto::{
    CreatePaymentDto, LedgerSummaryDto, PaymentLedgerDto, PaymentListQuery, PaymentResponseDto,
};
