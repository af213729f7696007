use crate::args::ConvertArgs;
use crate::commands::Out;
use crate::currency::normalize_code;
use crate::model::Amount;
use crate::{Config, Result};
use serde::Serialize;
use tracing::warn;

/// The result of a currency conversion.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub amount: Amount,
    pub from: String,
    pub to: String,
    pub result: Amount,
}

/// Converts an amount with the configured exchange rates. Unknown codes are treated as USD.
pub async fn convert(config: Config, args: ConvertArgs) -> Result<Out<Conversion>> {
    let rates = config.exchange_rates();
    let from = normalize_code(args.from(), rates.base());
    let to = normalize_code(args.to(), rates.base());
    for code in [&from, &to] {
        if !rates.is_known(code) {
            warn!("No exchange rate for {code}, treating it as USD");
        }
    }
    let result = Amount::from(rates.convert(args.amount().value(), &from, &to));
    let message = format!("{} {from} = {result} {to}", args.amount());
    Ok(Out::new(
        message,
        Conversion {
            amount: args.amount(),
            from,
            to,
            result,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_convert() {
        let env = TestEnv::new().await;
        let args = ConvertArgs::new(Amount::from_str("100").unwrap(), "usd", "eur");
        let out = convert(env.config(), args).await.unwrap();
        let conversion = out.structure().unwrap();
        assert_eq!(conversion.result.value(), Decimal::from(92));
        assert_eq!(out.message(), "100.00 USD = 92.00 EUR");
    }

    #[tokio::test]
    async fn test_convert_unknown_is_identity() {
        let env = TestEnv::new().await;
        let args = ConvertArgs::new(Amount::from_str("100").unwrap(), "XXX", "USD");
        let out = convert(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap().result.value(), Decimal::from(100));
    }
}
