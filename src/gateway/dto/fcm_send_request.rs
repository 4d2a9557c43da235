use super::PushMessage;
use serde::Serialize;

const ANDROID_PRIORITY_HIGH: &str = "high";
const DEFAULT_SOUND: &str = "default";

///
/// Body of FCM HTTP v1 `messages:send` request
///
#[derive(Debug, Serialize)]
pub struct FcmSendRequest<'a> {
    pub message: FcmMessage<'a>,
}

#[derive(Debug, Serialize)]
pub struct FcmMessage<'a> {
    pub token: &'a str,
    pub notification: FcmNotification<'a>,
    pub android: FcmAndroidConfig<'a>,
    pub apns: FcmApnsConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webpush: Option<FcmWebpushConfig<'a>>,
}

#[derive(Debug, Serialize)]
pub struct FcmNotification<'a> {
    pub title: &'a str,
    pub body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct FcmAndroidConfig<'a> {
    pub priority: &'static str,
    pub notification: FcmAndroidNotification<'a>,
}

#[derive(Debug, Serialize)]
pub struct FcmAndroidNotification<'a> {
    pub sound: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct FcmApnsConfig {
    pub payload: FcmApnsPayload,
}

#[derive(Debug, Serialize)]
pub struct FcmApnsPayload {
    pub aps: FcmAps,
}

#[derive(Debug, Serialize)]
pub struct FcmAps {
    pub sound: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FcmWebpushConfig<'a> {
    pub notification: FcmWebpushNotification<'a>,
}

#[derive(Debug, Serialize)]
pub struct FcmWebpushNotification<'a> {
    pub icon: &'a str,
    pub image: &'a str,
}

impl<'a> FcmSendRequest<'a> {
    pub fn new(token: &'a str, message: &'a PushMessage) -> Self {
        let image_url = message.image_url.as_deref();

        Self {
            message: FcmMessage {
                token,
                notification: FcmNotification {
                    title: &message.title,
                    body: &message.body,
                    image: image_url,
                },
                android: FcmAndroidConfig {
                    priority: ANDROID_PRIORITY_HIGH,
                    notification: FcmAndroidNotification {
                        sound: DEFAULT_SOUND,
                        icon: image_url,
                    },
                },
                apns: FcmApnsConfig {
                    payload: FcmApnsPayload {
                        aps: FcmAps {
                            sound: DEFAULT_SOUND,
                        },
                    },
                },
                webpush: image_url.map(|image_url| FcmWebpushConfig {
                    notification: FcmWebpushNotification {
                        icon: image_url,
                        image: image_url,
                    },
                }),
            },
        }
    }
}
