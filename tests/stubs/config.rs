pub const VALID_PAYLOAD_1: &str = r#"
{
    "default": {
        "timeoutReqToResMillis": 75,
        "headerType": 0,
        "maxCtrnonceDelayMsgs": 20,
        "maxSilenceIntervalMillis": 5000,
        "sessionRenewalDurationMillis": 2000,
        "ctrNonceUpperLimit": 16770256,
        "sessionDurationMillis": 60000,
        "delayBetweenRenNotificationsMillis": 500
    },
    "clients": [
        {
            "name": "Alice",
            "sid": 1,
            "ltk": "000102030405060708090A0B0C0D0E0F",
            "groups": ["Everyone", "Ops"]
        },
        {
            "name": "Bob",
            "sid": 2,
            "ltk": "101112131415161718191A1B1C1D1E1F",
            "timeoutReqToResMillis": 100,
            "groups": ["Everyone"]
        },
        {
            "name": "Charlie",
            "sid": 3,
            "ltk": "202122232425262728292A2B2C2D2E2F",
            "groups": ["Everyone", "Ops"]
        }
    ],
    "groups": [
        {
            "name": "Everyone",
            "gid": 0
        },
        {
            "name": "Ops",
            "gid": 1,
            "maxSilenceIntervalMillis": 3000
        }
    ]
}
"#;

/// One client with no timeout override relying on the default.
pub const MINIMAL_PAYLOAD: &str = r#"
{
    "default": {
        "timeoutReqToResMillis": 100,
        "headerType": 0,
        "maxCtrnonceDelayMsgs": 20,
        "maxSilenceIntervalMillis": 5000,
        "sessionRenewalDurationMillis": 2000,
        "ctrNonceUpperLimit": 16770000,
        "sessionDurationMillis": 60000,
        "delayBetweenRenNotificationsMillis": 500
    },
    "clients": [
        {
            "name": "C1",
            "sid": 1,
            "ltk": "000102030405060708090A0B0C0D0E0F",
            "groups": ["G1"]
        }
    ],
    "groups": [
        {
            "name": "G1",
            "gid": 0
        }
    ]
}
"#;

/// C2 references group G2, which is never declared.
pub const DANGLING_PAYLOAD: &str = r#"
{
    "default": {
        "timeoutReqToResMillis": 100,
        "headerType": 0,
        "maxCtrnonceDelayMsgs": 20,
        "maxSilenceIntervalMillis": 5000,
        "sessionRenewalDurationMillis": 2000,
        "ctrNonceUpperLimit": 16770000,
        "sessionDurationMillis": 60000,
        "delayBetweenRenNotificationsMillis": 500
    },
    "clients": [
        {
            "name": "C2",
            "sid": 1,
            "ltk": "000102030405060708090A0B0C0D0E0F",
            "groups": ["G2"]
        }
    ],
    "groups": [
        {
            "name": "G1",
            "gid": 0
        }
    ]
}
"#;

/// C1 lists group G1 twice.
pub const REPEATED_GROUP_PAYLOAD: &str = r#"
{
    "default": {
        "timeoutReqToResMillis": 100,
        "headerType": 0,
        "maxCtrnonceDelayMsgs": 20,
        "maxSilenceIntervalMillis": 5000,
        "sessionRenewalDurationMillis": 2000,
        "ctrNonceUpperLimit": 16770000,
        "sessionDurationMillis": 60000,
        "delayBetweenRenNotificationsMillis": 500
    },
    "clients": [
        {
            "name": "C1",
            "sid": 1,
            "ltk": "000102030405060708090A0B0C0D0E0F",
            "groups": ["G1", "G1"]
        }
    ],
    "groups": [
        {
            "name": "G1",
            "gid": 0
        }
    ]
}
"#;

pub const BAD_JSON_PAYLOAD: &str = r#"{"default": {}, "clients": "#;
